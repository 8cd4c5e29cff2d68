//! 최근 정제 결과를 텍스트 파일 산출물로 꺼내는 유스케이스.

use chrono::{DateTime, Local};

use crate::application::ports::ResultStore;
use crate::domain::prompt::DownloadArtifact;

/// 저장소의 최근 결과를 한 번 꺼내 다운로드 산출물로 만든다.
pub struct DownloadRefinedUseCase<'a> {
    pub result_store: &'a dyn ResultStore,
}

impl<'a> DownloadRefinedUseCase<'a> {
    /// 보관된 결과가 없으면 `None`. 파일 내용은 정제 본문 그대로다.
    pub fn execute(&self) -> Option<DownloadArtifact> {
        let stored = self.result_store.take_latest()?;
        Some(DownloadArtifact {
            filename: artifact_filename(stored.created_at),
            content: stored.result.refined_text,
        })
    }
}

pub fn artifact_filename(created_at: DateTime<Local>) -> String {
    format!("refined_prompt_{}.txt", created_at.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::TimeZone;

    use super::*;
    use crate::domain::prompt::{RefinementResult, StoredRefinement};

    struct OnceStore(Mutex<Option<StoredRefinement>>);

    impl ResultStore for OnceStore {
        fn save(&self, stored: StoredRefinement) {
            *self.0.lock().unwrap() = Some(stored);
        }

        fn take_latest(&self) -> Option<StoredRefinement> {
            self.0.lock().unwrap().take()
        }
    }

    #[test]
    fn artifact_contains_exactly_refined_text() {
        let created_at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let store = OnceStore(Mutex::new(Some(StoredRefinement {
            original: "write a poem".to_string(),
            result: RefinementResult {
                refined_text: "## Role\nPoet".to_string(),
                rationale: Vec::new(),
                used_ai: false,
            },
            created_at,
        })));
        let use_case = DownloadRefinedUseCase {
            result_store: &store,
        };

        let artifact = use_case.execute().expect("artifact");
        assert_eq!(artifact.filename, "refined_prompt_20240309_140507.txt");
        assert_eq!(artifact.content, "## Role\nPoet");

        assert!(use_case.execute().is_none());
    }
}

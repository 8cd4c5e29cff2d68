//! 프롬프트 정제 유스케이스: 입력 검증 → 구조 분석 → 합성 → (선택) AI 보강 → 결과 보관.

use std::time::Duration;

use chrono::Local;
use tracing::{debug, info, warn};

use crate::application::config::Config;
use crate::application::ports::{EnhancementError, EnhancementPort, ResultStore};
use crate::domain::analyzer::analyze;
use crate::domain::prompt::{
    InputError, RawPrompt, RefineRequest, RefinementResult, StoredRefinement,
};
use crate::domain::synthesizer::{has_canonical_structure_around, synthesize};

/// 한 번의 정제 요청을 처리한다. 호출 간 공유 상태는 결과 저장소뿐이다.
pub struct RefinePromptUseCase<'a> {
    pub config: &'a Config,
    pub enhancer: Option<&'a dyn EnhancementPort>,
    pub result_store: &'a dyn ResultStore,
}

impl<'a> RefinePromptUseCase<'a> {
    /// 정제 실행 진입점.
    /// 입력 오류만 실패로 반환하며, 보강 실패는 휴리스틱 결과로 대체된다.
    pub async fn execute(&self, request: RefineRequest) -> Result<RefinementResult, InputError> {
        let raw = RawPrompt::new(&request.prompt, self.config.max_prompt_chars())?;

        let parsed = analyze(&raw);
        debug!(
            has_role = parsed.has_role,
            has_objective = parsed.has_objective,
            has_constraints = parsed.has_constraints,
            has_steps = parsed.has_steps,
            has_output_format = parsed.has_output_format,
            "analyzed prompt"
        );

        let mut result = synthesize(&raw, &parsed);

        if request.allow_enhancement {
            match self.enhancer {
                Some(enhancer) => {
                    let timeout = self.config.enhance_timeout();
                    match enhance_draft(enhancer, &result.refined_text, raw.as_str(), timeout).await {
                        Ok(text) => {
                            info!(provider = enhancer.name(), "applied AI enhancement");
                            result.refined_text = text;
                            result.used_ai = true;
                        }
                        Err(err) => {
                            warn!(
                                provider = enhancer.name(),
                                error = %err,
                                "AI enhancement failed; using heuristic draft"
                            );
                        }
                    }
                }
                None => debug!("{}", EnhancementError::Unavailable),
            }
        }

        self.result_store.save(StoredRefinement {
            original: raw.as_str().to_string(),
            result: result.clone(),
            created_at: Local::now(),
        });

        Ok(result)
    }
}

/// 타임아웃 안에서 보강을 호출하고, 섹션 구조가 보존된 경우에만 성공으로 본다.
async fn enhance_draft(
    enhancer: &dyn EnhancementPort,
    draft: &str,
    original: &str,
    timeout: Duration,
) -> Result<String, EnhancementError> {
    let enhanced = tokio::time::timeout(timeout, enhancer.enhance(draft))
        .await
        .map_err(|_| EnhancementError::Timeout(timeout))??;

    let enhanced = enhanced.trim();
    if enhanced.is_empty() {
        return Err(EnhancementError::Empty);
    }
    if !has_canonical_structure_around(enhanced, original) {
        return Err(EnhancementError::Malformed(
            "enhanced text does not keep the seven section headings in order".to_string(),
        ));
    }

    Ok(enhanced.to_string())
}

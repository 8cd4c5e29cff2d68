//! `config` 명령 유스케이스: 병합 설정 점검과 템플릿 파일 생성.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::ConfigRepository;

pub struct ManageConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl<'a> ManageConfigUseCase<'a> {
    /// 탐색 경로, 적용값, provider 키 해석 상태를 JSON으로 반환한다.
    pub fn inspect(&self) -> Result<String> {
        self.config_repo.inspect_pretty_json()
    }

    /// 템플릿을 쓰고 경로를 반환한다. 기존 파일은 덮어쓰지 않는다.
    pub fn init_template(&self) -> Result<PathBuf> {
        let path = self.config_repo.init_template()?;
        tracing::info!(path = %path.display(), "config template ready");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::bail;

    use super::*;
    use crate::application::config::Config;

    struct FixedRepo;

    impl ConfigRepository for FixedRepo {
        fn load(&self) -> Result<Config> {
            Ok(Config::default())
        }

        fn inspect_pretty_json(&self) -> Result<String> {
            Ok("{}".to_string())
        }

        fn init_template(&self) -> Result<PathBuf> {
            bail!("read-only location")
        }
    }

    #[test]
    fn delegates_to_repository() {
        let use_case = ManageConfigUseCase {
            config_repo: &FixedRepo,
        };
        assert_eq!(use_case.inspect().unwrap(), "{}");
        let err = use_case.init_template().unwrap_err();
        assert_eq!(err.to_string(), "read-only location");
    }
}

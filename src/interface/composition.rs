//! 애플리케이션 조립(composition root) 모듈.

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::{ConfigRepository, EnhancementPort, EnhancerFactory, Reporter};
use crate::application::usecases::download::DownloadRefinedUseCase;
use crate::application::usecases::manage_config::ManageConfigUseCase;
use crate::application::usecases::refine_prompt::RefinePromptUseCase;
use crate::infrastructure::adapters::{
    ConsoleReporter, EnhancerFactoryAdapter, InMemoryResultStore, JsonConfigRepository,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
/// 프로세스 전역 설정과 최근 결과 저장소를 소유한다.
pub struct AppComposition {
    config: Config,
    config_repo: JsonConfigRepository,
    enhancer: Option<Box<dyn EnhancementPort>>,
    result_store: InMemoryResultStore,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    /// 설정 파일을 읽지 않고, 보강 provider 없이 기본값으로 조립한다.
    fn default() -> Self {
        Self::with_enhancer(Config::default(), None)
    }
}

impl AppComposition {
    /// 병합된 설정 파일을 읽어 조립한다.
    pub fn load() -> Result<Self> {
        let config = JsonConfigRepository.load()?;
        Ok(Self::new(config))
    }

    /// 주어진 설정으로 조립하고, 가능하면 보강 provider를 구성한다.
    pub fn new(config: Config) -> Self {
        let enhancer = EnhancerFactoryAdapter.build(&config);
        match &enhancer {
            Some(provider) => tracing::debug!(provider = provider.name(), "enhancement enabled"),
            None => tracing::debug!("enhancement provider not configured"),
        }
        Self::with_enhancer(config, enhancer)
    }

    /// 보강 provider를 직접 주입한다(테스트/임베딩용).
    pub fn with_enhancer(config: Config, enhancer: Option<Box<dyn EnhancementPort>>) -> Self {
        Self {
            config,
            config_repo: JsonConfigRepository,
            enhancer,
            result_store: InMemoryResultStore::new(),
            reporter: ConsoleReporter,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn reporter(&self) -> &dyn Reporter {
        &self.reporter
    }

    /// 프롬프트 정제 유스케이스를 생성한다.
    pub fn refine_usecase(&self) -> RefinePromptUseCase<'_> {
        RefinePromptUseCase {
            config: &self.config,
            enhancer: self.enhancer.as_deref(),
            result_store: &self.result_store,
        }
    }

    /// 최근 결과 다운로드 유스케이스를 생성한다.
    pub fn download_usecase(&self) -> DownloadRefinedUseCase<'_> {
        DownloadRefinedUseCase {
            result_store: &self.result_store,
        }
    }

    /// 설정 점검/템플릿 생성 유스케이스를 생성한다.
    pub fn config_usecase(&self) -> ManageConfigUseCase<'_> {
        ManageConfigUseCase {
            config_repo: &self.config_repo,
        }
    }
}

//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::application::config::Config;
use crate::domain::prompt::StoredRefinement;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
    /// 템플릿 설정 파일을 (없을 때만) 만들고 경로를 반환한다.
    fn init_template(&self) -> Result<PathBuf>;
}

/// AI 보강 실패 사유. 어떤 경우에도 정제 자체를 실패시키지 않는다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnhancementError {
    #[error("enhancement provider is not configured")]
    Unavailable,
    #[error("enhancement timed out after {0:?}")]
    Timeout(Duration),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("quota exceeded: {0}")]
    Quota(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("provider returned an empty response")]
    Empty,
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// 휴리스틱 초안의 문장을 다듬는 외부 모델 포트.
#[async_trait]
pub trait EnhancementPort: Send + Sync {
    /// 로그/표시용 이름
    fn name(&self) -> &'static str;
    async fn enhance(&self, draft: &str) -> Result<String, EnhancementError>;
}

/// 설정에 맞는 보강 포트를 구성하는 팩토리 포트(키가 없으면 `None`).
pub trait EnhancerFactory: Send + Sync {
    fn build(&self, config: &Config) -> Option<Box<dyn EnhancementPort>>;
}

/// 다운로드용 최근 결과 한 건을 보관하는 저장소 포트.
/// 마지막 쓰기가 이기며, 한 번 꺼내면 비워진다.
pub trait ResultStore: Send + Sync {
    fn save(&self, stored: StoredRefinement);
    fn take_latest(&self) -> Option<StoredRefinement>;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn raw(&self, line: &str);
}

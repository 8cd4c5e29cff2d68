//! 보강 provider 팩토리 포트 구현 어댑터.

use crate::application::config::Config;
use crate::application::ports::{EnhancementPort, EnhancerFactory};
use crate::infrastructure::providers;

/// 설정에서 사용 가능한 보강 provider를 고르는 어댑터.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnhancerFactoryAdapter;

impl EnhancerFactory for EnhancerFactoryAdapter {
    fn build(&self, config: &Config) -> Option<Box<dyn EnhancementPort>> {
        providers::build_enhancer(config)
    }
}

//! 문체 보강(enhancement) provider 모듈.
//! 호스팅 모델 API를 호출해 휴리스틱 초안의 문장을 다듬는다.

pub mod gemini;
mod api_runner;
mod prompt;
mod response;

use crate::application::config::Config;
use crate::application::ports::EnhancementPort;

pub use prompt::build_enhancement_prompt;
pub use response::parse_enhanced_text;

/// 키가 해석된 provider만 활성화한다. 없으면 휴리스틱 결과만 사용한다.
pub fn build_enhancer(config: &Config) -> Option<Box<dyn EnhancementPort>> {
    gemini::GeminiEnhancer::from_config(config)
        .map(|provider| Box::new(provider) as Box<dyn EnhancementPort>)
}

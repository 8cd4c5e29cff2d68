//! Domain layer
//! 프롬프트 분석/합성 규칙을 외부 의존성(I/O) 없이 표현한다.

pub mod analyzer;
pub mod prompt;
pub mod synthesizer;

//! 유스케이스 모음.

pub mod download;
pub mod manage_config;
pub mod refine_prompt;

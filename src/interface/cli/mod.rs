//! CLI 인터페이스 모듈 묶음.
//! 입력 파싱과 명령 실행을 한 네임스페이스로 관리한다.

pub mod command;
mod refine;

pub use command::{Cli, CliAction, RefineOptions, ServeOptions};
pub use refine::run_refine;

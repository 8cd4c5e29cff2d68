//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod config_repository;
mod enhancer_factory;
mod reporter;
mod result_store;

pub use config_repository::JsonConfigRepository;
pub use enhancer_factory::EnhancerFactoryAdapter;
pub use reporter::ConsoleReporter;
pub use result_store::InMemoryResultStore;

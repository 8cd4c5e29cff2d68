//! 최근 정제 결과 저장소 포트 구현 어댑터.

use std::sync::{Mutex, MutexGuard};

use crate::application::ports::ResultStore;
use crate::domain::prompt::StoredRefinement;

/// 프로세스 메모리에 결과 한 건만 보관하는 저장소.
#[derive(Debug, Default)]
pub struct InMemoryResultStore {
    slot: Mutex<Option<StoredRefinement>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<StoredRefinement>> {
        // 패닉으로 오염된 경우에도 슬롯 값 자체는 유효하다.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ResultStore for InMemoryResultStore {
    fn save(&self, stored: StoredRefinement) {
        *self.lock() = Some(stored);
    }

    fn take_latest(&self) -> Option<StoredRefinement> {
        self.lock().take()
    }
}

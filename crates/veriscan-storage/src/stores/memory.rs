use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use veriscan_core::MatchCount;

use super::ConfigStore;
use crate::error::{StorageError, StorageResult};

#[derive(Debug, Default)]
struct Inner {
    stored: Mutex<Option<MatchCount>>,
    saves: Mutex<Vec<MatchCount>>,
    fail_saves: AtomicBool,
}

/// In-memory store for tests and ephemeral runs
///
/// Clones share the same state, so a test can keep one clone to inspect
/// what the station persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    inner: Arc<Inner>,
}

impl MemoryConfigStore {
    /// Create an empty store; the first load heals it to the default
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `count`
    pub fn with_count(count: MatchCount) -> Self {
        let store = Self::default();
        *lock(&store.inner.stored) = Some(count);
        store
    }

    /// The currently stored count, if any
    pub fn stored(&self) -> Option<MatchCount> {
        *lock(&self.inner.stored)
    }

    /// Every count passed to a successful `save`, oldest first
    pub fn saves(&self) -> Vec<MatchCount> {
        lock(&self.inner.saves).clone()
    }

    /// Make subsequent saves fail (or succeed again)
    pub fn set_fail_saves(&self, fail: bool) {
        self.inner.fail_saves.store(fail, Ordering::SeqCst);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ConfigStore for MemoryConfigStore {
    async fn load(&self) -> StorageResult<MatchCount> {
        let mut stored = lock(&self.inner.stored);
        Ok(*stored.get_or_insert_with(MatchCount::default))
    }

    async fn save(&self, count: MatchCount) -> StorageResult<()> {
        if self.inner.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "memory store configured to fail saves".to_string(),
            ));
        }
        *lock(&self.inner.stored) = Some(count);
        lock(&self.inner.saves).push(count);
        Ok(())
    }
}

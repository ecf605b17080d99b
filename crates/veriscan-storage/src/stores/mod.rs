#![allow(async_fn_in_trait)]

pub mod file;
pub mod memory;

pub use file::FileConfigStore;
pub use memory::MemoryConfigStore;

use crate::error::StorageResult;
use veriscan_core::MatchCount;

/// Persistence for the station's match count
///
/// The station reads the count once at startup and writes it when a
/// programming session is committed. Nothing else is persisted.
///
/// # Implementation Note
///
/// This trait uses native async trait methods (Edition 2024 feature),
/// eliminating the need for the async-trait crate while maintaining
/// full async/await support in trait methods.
pub trait ConfigStore: Send + Sync {
    /// Load the persisted count
    ///
    /// Missing or invalid content yields the default count (2), and the
    /// store is rewritten with it where the backend supports that.
    async fn load(&self) -> StorageResult<MatchCount>;

    /// Persist a new count
    async fn save(&self, count: MatchCount) -> StorageResult<()>;
}

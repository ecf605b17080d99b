//! Persistence layer for the verified-read station.
//!
//! The only persisted state is the match count: how many consecutive
//! identical scans a session requires. This crate provides the
//! [`ConfigStore`] trait the station depends on, plus two implementations:
//!
//! - [`FileConfigStore`] - stores the match mode token in a small text file
//! - [`MemoryConfigStore`] - process-local store for tests and ephemeral runs
//!
//! # Self-Healing Loads
//!
//! A missing file or content that is not a match mode token never fails a
//! load. The store falls back to the default count of 2 and rewrites the
//! file with it.
//!
//! # Examples
//!
//! ```no_run
//! use veriscan_storage::{ConfigStore, FileConfigStore, StoreConfig};
//! use veriscan_core::MatchCount;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileConfigStore::new(StoreConfig::new("/var/lib/veriscan/current_match_mode.txt"));
//!
//! let current = store.load().await?;
//! println!("Sessions need {} matching scans", current);
//!
//! store.save(MatchCount::new(5)?).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod stores;

pub use config::StoreConfig;
pub use error::{StorageError, StorageResult};
pub use stores::{ConfigStore, FileConfigStore, MemoryConfigStore};

use std::path::{Path, PathBuf};

use veriscan_core::constants::DEFAULT_STORE_FILE;

/// Configuration for the file-backed match count store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the file holding the match mode token
    pub path: PathBuf,

    /// Whether loading writes the default when the file is missing or invalid
    pub create_if_missing: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_FILE),
            create_if_missing: true,
        }
    }
}

impl StoreConfig {
    /// Create a new store configuration with the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set whether loading rewrites a missing or invalid file
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Get the store path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

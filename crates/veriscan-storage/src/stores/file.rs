use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info, warn};
use veriscan_core::MatchCount;

use super::ConfigStore;
use crate::config::StoreConfig;
use crate::error::{StorageError, StorageResult};

/// File-backed store holding the match mode token (e.g. `__MATCH05__`)
///
/// The file content is the bare token. Surrounding whitespace is ignored on
/// read. Writes go to a sibling temporary file that is then renamed over the
/// target, so a crash mid-write never leaves a truncated token behind.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    config: StoreConfig,
}

impl FileConfigStore {
    /// Create a new file store
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Get the store path
    pub fn path(&self) -> &Path {
        self.config.path()
    }

    fn display_path(&self) -> String {
        self.path().display().to_string()
    }

    /// Read and parse the stored token
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file cannot be read and
    /// `StorageError::InvalidContent` if it holds anything but a token.
    pub async fn read_stored(&self) -> StorageResult<MatchCount> {
        let content = tokio::fs::read_to_string(self.path())
            .await
            .map_err(|e| StorageError::io(self.display_path(), e))?;
        let token = content.trim();
        MatchCount::from_token(token).ok_or_else(|| StorageError::InvalidContent(token.to_string()))
    }

    async fn write_token(&self, count: MatchCount) -> StorageResult<()> {
        let path = self.path();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::io(parent.display().to_string(), e))?;
        }

        let staging = path.with_extension("tmp");
        tokio::fs::write(&staging, count.token())
            .await
            .map_err(|e| StorageError::io(staging.display().to_string(), e))?;
        tokio::fs::rename(&staging, path)
            .await
            .map_err(|e| StorageError::io(self.display_path(), e))?;
        Ok(())
    }
}

impl ConfigStore for FileConfigStore {
    async fn load(&self) -> StorageResult<MatchCount> {
        match self.read_stored().await {
            Ok(count) => {
                debug!("Loaded match count {} from {}", count, self.display_path());
                return Ok(count);
            }
            Err(StorageError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                info!("No stored match count at {}", self.display_path());
            }
            Err(e) => {
                warn!("Discarding stored match count: {}", e);
            }
        }

        let count = MatchCount::default();
        if self.config.create_if_missing {
            // Self-heal; a failed rewrite still yields the default
            if let Err(e) = self.write_token(count).await {
                warn!("Failed to rewrite default match count: {}", e);
            }
        }
        Ok(count)
    }

    async fn save(&self, count: MatchCount) -> StorageResult<()> {
        self.write_token(count).await?;
        info!("Saved match count {} to {}", count, self.display_path());
        Ok(())
    }
}

use thiserror::Error;

/// Storage-specific error types for the station configuration.
///
/// These errors represent failures reading or writing the persisted match
/// count. Loading never surfaces `InvalidContent`; it self-heals instead.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored content is not a match mode token
    #[error("Invalid stored content: {0:?}")]
    InvalidContent(String),

    /// Store refused the write
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Specialized result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let error = StorageError::io(
            "/tmp/mode.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(error.to_string(), "I/O error on /tmp/mode.txt: denied");
    }

    #[test]
    fn test_invalid_content_display() {
        let error = StorageError::InvalidContent("__MATCH99__".to_string());
        assert_eq!(error.to_string(), "Invalid stored content: \"__MATCH99__\"");
    }
}

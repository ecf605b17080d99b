use thiserror::Error;
use veriscan_hardware::HardwareError;

/// Errors that end a station run.
///
/// Per-event problems (malformed input, indicator failures, a failed commit)
/// are logged and never surface here.
#[derive(Debug, Error)]
pub enum StationError {
    /// The event source failed or disconnected
    #[error("Event source failed: {0}")]
    Source(#[from] HardwareError),
}

impl StationError {
    /// Returns `true` if the event source reached its end.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, Self::Source(e) if e.is_disconnect())
    }
}

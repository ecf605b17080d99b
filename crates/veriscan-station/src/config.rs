//! Station configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use veriscan_core::constants::DEFAULT_PULSE_MS;

/// Runtime settings for a [`Station`](crate::Station).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationConfig {
    /// How long the pass/fail/commit-failure pulse stays lit.
    pub pulse_duration: Duration,

    /// Whether an empty line counts as a scan.
    ///
    /// When `false`, empty barcodes are dropped before they reach the mode
    /// state machine.
    pub forward_empty_barcodes: bool,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            pulse_duration: Duration::from_millis(DEFAULT_PULSE_MS),
            forward_empty_barcodes: true,
        }
    }
}

impl StationConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pulse duration.
    pub fn pulse_duration(mut self, duration: Duration) -> Self {
        self.pulse_duration = duration;
        self
    }

    /// Set whether empty barcodes are processed.
    pub fn forward_empty_barcodes(mut self, forward: bool) -> Self {
        self.forward_empty_barcodes = forward;
        self
    }
}

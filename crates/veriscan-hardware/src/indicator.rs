//! Indicator stand-ins for stations without indicator hardware.
//!
//! [`LoggingIndicator`] reports every command through `tracing` and keeps the
//! real timing, so a station without lights behaves exactly like one with
//! them. [`NullIndicator`] does nothing and returns immediately.

use std::time::Duration;

use tracing::info;
use veriscan_core::constants::DEFAULT_BLINK_INTERVAL_MS;

use crate::{
    Result,
    traits::IndicatorSink,
    types::{IndicatorColor, IndicatorCommand},
};

/// Indicator that logs commands and sleeps through timed operations.
#[derive(Debug, Clone)]
pub struct LoggingIndicator {
    blink_interval: Duration,
}

impl LoggingIndicator {
    /// Create a logging indicator with the default blink interval.
    pub fn new() -> Self {
        Self {
            blink_interval: Duration::from_millis(DEFAULT_BLINK_INTERVAL_MS),
        }
    }

    /// Set the half period of a blink.
    pub fn with_blink_interval(mut self, interval: Duration) -> Self {
        self.blink_interval = interval;
        self
    }

    /// Get the half period of a blink.
    pub fn blink_interval(&self) -> Duration {
        self.blink_interval
    }
}

impl Default for LoggingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorSink for LoggingIndicator {
    async fn pulse(&mut self, color: IndicatorColor, duration: Duration) -> Result<()> {
        info!(target: "veriscan::indicator", "{}", IndicatorCommand::On { color });
        tokio::time::sleep(duration).await;
        info!(target: "veriscan::indicator", "{}", IndicatorCommand::Off { color });
        Ok(())
    }

    async fn set_on(&mut self, color: IndicatorColor) -> Result<()> {
        info!(target: "veriscan::indicator", "{}", IndicatorCommand::On { color });
        Ok(())
    }

    async fn set_off(&mut self, color: IndicatorColor) -> Result<()> {
        info!(target: "veriscan::indicator", "{}", IndicatorCommand::Off { color });
        Ok(())
    }

    async fn blink(&mut self, color: IndicatorColor, times: u8) -> Result<()> {
        for blink in 1..=times {
            info!(target: "veriscan::indicator", "blink {} {}/{}", color, blink, times);
            tokio::time::sleep(self.blink_interval).await;
            tokio::time::sleep(self.blink_interval).await;
        }
        Ok(())
    }

    async fn all_off(&mut self) -> Result<()> {
        info!(target: "veriscan::indicator", "{}", IndicatorCommand::AllOff);
        Ok(())
    }
}

/// Indicator that ignores every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullIndicator;

impl IndicatorSink for NullIndicator {
    async fn pulse(&mut self, _color: IndicatorColor, _duration: Duration) -> Result<()> {
        Ok(())
    }

    async fn set_on(&mut self, _color: IndicatorColor) -> Result<()> {
        Ok(())
    }

    async fn set_off(&mut self, _color: IndicatorColor) -> Result<()> {
        Ok(())
    }

    async fn blink(&mut self, _color: IndicatorColor, _times: u8) -> Result<()> {
        Ok(())
    }
}

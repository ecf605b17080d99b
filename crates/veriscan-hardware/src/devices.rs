//! Enum wrapper for indicator dispatch.
//!
//! Native `async fn` in traits (RPITIT - Rust Edition 2024) are not object-safe,
//! so `Box<dyn IndicatorSink>` is not available. The binary picks an indicator
//! once at startup from configuration; this enum provides that choice with
//! concrete type dispatch.
//!
//! # Examples
//!
//! ```
//! use veriscan_hardware::devices::{AnyIndicator, IndicatorKind};
//!
//! let indicator = AnyIndicator::from_kind(IndicatorKind::None);
//! assert!(matches!(indicator, AnyIndicator::Null(_)));
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::indicator::{LoggingIndicator, NullIndicator};
use crate::traits::IndicatorSink;
use crate::{IndicatorColor, Result};

/// Which indicator implementation to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    /// Log each command through `tracing`, keeping real timing.
    #[default]
    Logging,
    /// Ignore every command.
    None,
}

impl std::str::FromStr for IndicatorKind {
    type Err = crate::HardwareError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "logging" | "log" => Ok(Self::Logging),
            "none" | "null" | "off" => Ok(Self::None),
            other => Err(crate::HardwareError::unsupported(format!(
                "indicator kind '{other}'"
            ))),
        }
    }
}

/// Enum wrapper for indicator dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyIndicator {
    /// Logging stand-in for stations without lights.
    Logging(LoggingIndicator),
    /// No output at all.
    Null(NullIndicator),
    // GPIO-driven lights plug in here once a driver exists.
}

impl AnyIndicator {
    /// Build the default indicator for `kind`.
    pub fn from_kind(kind: IndicatorKind) -> Self {
        match kind {
            IndicatorKind::Logging => Self::Logging(LoggingIndicator::new()),
            IndicatorKind::None => Self::Null(NullIndicator),
        }
    }

    /// Build the indicator for `kind` with a custom blink interval.
    pub fn with_blink_interval(kind: IndicatorKind, interval: Duration) -> Self {
        match kind {
            IndicatorKind::Logging => {
                Self::Logging(LoggingIndicator::new().with_blink_interval(interval))
            }
            IndicatorKind::None => Self::Null(NullIndicator),
        }
    }
}

impl IndicatorSink for AnyIndicator {
    async fn pulse(&mut self, color: IndicatorColor, duration: Duration) -> Result<()> {
        match self {
            Self::Logging(device) => device.pulse(color, duration).await,
            Self::Null(device) => device.pulse(color, duration).await,
        }
    }

    async fn set_on(&mut self, color: IndicatorColor) -> Result<()> {
        match self {
            Self::Logging(device) => device.set_on(color).await,
            Self::Null(device) => device.set_on(color).await,
        }
    }

    async fn set_off(&mut self, color: IndicatorColor) -> Result<()> {
        match self {
            Self::Logging(device) => device.set_off(color).await,
            Self::Null(device) => device.set_off(color).await,
        }
    }

    async fn blink(&mut self, color: IndicatorColor, times: u8) -> Result<()> {
        match self {
            Self::Logging(device) => device.blink(color, times).await,
            Self::Null(device) => device.blink(color, times).await,
        }
    }

    async fn all_off(&mut self) -> Result<()> {
        match self {
            Self::Logging(device) => device.all_off().await,
            Self::Null(device) => device.all_off().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_kind_from_str() {
        assert_eq!("logging".parse::<IndicatorKind>().unwrap(), IndicatorKind::Logging);
        assert_eq!("LOG".parse::<IndicatorKind>().unwrap(), IndicatorKind::Logging);
        assert_eq!("none".parse::<IndicatorKind>().unwrap(), IndicatorKind::None);
        assert!("gpio".parse::<IndicatorKind>().is_err());
    }

    #[test]
    fn test_from_kind() {
        assert!(matches!(
            AnyIndicator::from_kind(IndicatorKind::Logging),
            AnyIndicator::Logging(_)
        ));
        assert!(matches!(
            AnyIndicator::from_kind(IndicatorKind::None),
            AnyIndicator::Null(_)
        ));
    }

    #[test]
    fn test_with_blink_interval() {
        let indicator =
            AnyIndicator::with_blink_interval(IndicatorKind::Logging, Duration::from_millis(100));
        match indicator {
            AnyIndicator::Logging(device) => {
                assert_eq!(device.blink_interval(), Duration::from_millis(100))
            }
            other => panic!("unexpected indicator {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_null() {
        let mut indicator = AnyIndicator::from_kind(IndicatorKind::None);
        indicator.set_on(IndicatorColor::Red).await.unwrap();
        indicator.blink(IndicatorColor::Green, 2).await.unwrap();
        indicator.all_off().await.unwrap();
    }
}

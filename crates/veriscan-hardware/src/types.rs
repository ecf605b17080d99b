//! Common types shared across device implementations.
//!
//! This module defines device information, indicator colors and the
//! indicator command record used by the mock and logging indicators.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Generic device information.
///
/// Contains metadata about a device such as name, model and the path it
/// was opened from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device name (e.g., "Honeywell 1900", "Mock Scanner").
    pub name: String,

    /// Device model identifier.
    pub model: String,

    /// Optional device path (e.g., "/dev/input/event2").
    pub path: Option<String>,
}

impl DeviceInfo {
    /// Create a new DeviceInfo with required fields.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            path: None,
        }
    }

    /// Set the device path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Colors of the tri-color status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorColor {
    /// Pass, and programming confirmation.
    Green,

    /// Fail, and programming mode.
    Red,

    /// Session in progress.
    Yellow,
}

impl IndicatorColor {
    /// Every color, in the order they are switched off.
    pub const ALL: [IndicatorColor; 3] = [
        IndicatorColor::Green,
        IndicatorColor::Red,
        IndicatorColor::Yellow,
    ];
}

impl fmt::Display for IndicatorColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Green => write!(f, "green"),
            Self::Red => write!(f, "red"),
            Self::Yellow => write!(f, "yellow"),
        }
    }
}

/// One operation requested from an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum IndicatorCommand {
    /// Turn a color on, wait, turn it off.
    Pulse {
        color: IndicatorColor,
        duration: Duration,
    },

    /// Turn a color on and leave it on.
    On { color: IndicatorColor },

    /// Turn a color off.
    Off { color: IndicatorColor },

    /// Blink a color a number of times.
    Blink { color: IndicatorColor, times: u8 },

    /// Turn every color off.
    AllOff,
}

impl fmt::Display for IndicatorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pulse { color, duration } => {
                write!(f, "pulse {} for {}ms", color, duration.as_millis())
            }
            Self::On { color } => write!(f, "{} on", color),
            Self::Off { color } => write!(f, "{} off", color),
            Self::Blink { color, times } => write!(f, "blink {} x{}", color, times),
            Self::AllOff => write!(f, "all off"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_info_builder() {
        let info = DeviceInfo::new("Honeywell 1900", "Keyboard wedge").with_path("/dev/input/event2");

        assert_eq!(info.name, "Honeywell 1900");
        assert_eq!(info.model, "Keyboard wedge");
        assert_eq!(info.path, Some("/dev/input/event2".to_string()));
    }

    #[test]
    fn test_device_info_minimal() {
        let info = DeviceInfo::new("Mock Scanner", "Mock");
        assert_eq!(info.path, None);
    }

    #[test]
    fn test_indicator_color_display() {
        assert_eq!(IndicatorColor::Green.to_string(), "green");
        assert_eq!(IndicatorColor::Red.to_string(), "red");
        assert_eq!(IndicatorColor::Yellow.to_string(), "yellow");
        assert_eq!(IndicatorColor::ALL.len(), 3);
    }

    #[test]
    fn test_indicator_command_display() {
        let pulse = IndicatorCommand::Pulse {
            color: IndicatorColor::Red,
            duration: Duration::from_secs(1),
        };
        assert_eq!(pulse.to_string(), "pulse red for 1000ms");

        let blink = IndicatorCommand::Blink {
            color: IndicatorColor::Green,
            times: 5,
        };
        assert_eq!(blink.to_string(), "blink green x5");
        assert_eq!(IndicatorCommand::AllOff.to_string(), "all off");
    }

    #[test]
    fn test_indicator_command_serialization() {
        let command = IndicatorCommand::On {
            color: IndicatorColor::Yellow,
        };
        let json = serde_json::to_string(&command).unwrap();
        assert_eq!(json, r#"{"op":"on","color":"yellow"}"#);

        let back: IndicatorCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, command);
    }
}

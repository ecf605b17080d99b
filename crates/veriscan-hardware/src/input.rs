//! Scanner read straight from a Linux input device node.
//!
//! A keyboard-emulating scanner shows up as `/dev/input/eventN`. This source
//! opens that node and hands every event it reports to the station
//! unchanged; filtering non-key events is the decoder's job.
//!
//! The device is not grabbed, so keystrokes still reach the focused console.
//! Finding the right node is left to the caller.

use std::io;
use std::path::Path;

use evdev::{Device, EventStream, InputEvent};
use tracing::{debug, info};
use veriscan_core::RawKeyEvent;

use crate::{DeviceInfo, EventSource, HardwareError, Result};

/// `ENODEV`, reported once the device has been unplugged.
const ENODEV: i32 = 19;

/// Event source over an evdev device node.
pub struct EvdevEventSource {
    stream: EventStream,
    info: DeviceInfo,
}

impl EvdevEventSource {
    /// Open the device at `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the node cannot be opened, or if the device
    /// reports no keys at all and so cannot be a scanner.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let device = Device::open(path)?;

        if device.supported_keys().is_none() {
            return Err(HardwareError::invalid_data(format!(
                "{} reports no keys",
                path.display()
            )));
        }

        let info = DeviceInfo::new(device.name().unwrap_or("unnamed"), "evdev")
            .with_path(path.display().to_string());
        info!("Opened scanner {} at {}", info.name, path.display());

        let stream = device.into_event_stream()?;
        Ok(Self { stream, info })
    }
}

impl std::fmt::Debug for EvdevEventSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvdevEventSource")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

impl EventSource for EvdevEventSource {
    async fn next_event(&mut self) -> Result<RawKeyEvent> {
        match self.stream.next_event().await {
            Ok(event) => Ok(raw_from_input(&event)),
            Err(e) => Err(read_error(&self.info, e)),
        }
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        Ok(self.info.clone())
    }
}

fn raw_from_input(event: &InputEvent) -> RawKeyEvent {
    RawKeyEvent {
        event_type: event.event_type().0,
        code: event.code(),
        value: event.value(),
    }
}

fn read_error(info: &DeviceInfo, error: io::Error) -> HardwareError {
    if error.raw_os_error() == Some(ENODEV) {
        debug!("{} went away: {}", info.name, error);
        let device = info.path.as_deref().unwrap_or(info.name.as_str());
        return HardwareError::disconnected(device);
    }
    HardwareError::Io(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evdev::EventType;
    use veriscan_core::{KeyCode, KeyEvent, KeyKind};

    #[test]
    fn test_key_event_maps_to_raw() {
        let event = InputEvent::new(EventType::KEY, 30, 1);

        let raw = raw_from_input(&event);

        assert_eq!(raw, RawKeyEvent::key(30, 1));
        assert_eq!(
            KeyEvent::from_raw(&raw),
            Some(KeyEvent::new(KeyCode::A, KeyKind::Down))
        );
    }

    #[test]
    fn test_sync_event_is_passed_through() {
        let event = InputEvent::new(EventType::SYNCHRONIZATION, 0, 0);

        let raw = raw_from_input(&event);

        assert_eq!(raw.event_type, 0);
        assert_eq!(KeyEvent::from_raw(&raw), None);
    }

    #[test]
    fn test_unplugged_device_is_disconnect() {
        let info = DeviceInfo::new("Honeywell 1900", "evdev").with_path("/dev/input/event2");

        let error = read_error(&info, io::Error::from_raw_os_error(ENODEV));

        assert!(error.is_disconnect());
        assert_eq!(error.to_string(), "Device disconnected: /dev/input/event2");
    }

    #[test]
    fn test_other_read_errors_are_io() {
        let info = DeviceInfo::new("Honeywell 1900", "evdev");

        let error = read_error(&info, io::Error::from(io::ErrorKind::PermissionDenied));

        assert!(matches!(error, HardwareError::Io(_)));
        assert!(!error.is_disconnect());
    }

    #[test]
    fn test_missing_node_fails_to_open() {
        let error = EvdevEventSource::open("/nonexistent/event99").unwrap_err();
        assert!(matches!(error, HardwareError::Io(_)));
    }
}

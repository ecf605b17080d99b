//! Mock scanner implementation for testing and development.
//!
//! This module provides a simulated keyboard-emulating scanner that can be
//! driven programmatically without requiring physical hardware.

use crate::{Result, traits::EventSource, types::DeviceInfo};
use tokio::sync::mpsc;
use veriscan_core::{KeyEvent, RawKeyEvent, keystrokes_for, scan_keystrokes};

/// Mock scanner device for testing and development.
///
/// This device yields raw events received through an internal channel.
/// Tests send key presses, text or whole scans through a `MockScannerHandle`.
/// Dropping every handle disconnects the scanner.
///
/// # Examples
///
/// ```
/// use veriscan_hardware::mock::MockScanner;
/// use veriscan_hardware::traits::EventSource;
/// use veriscan_core::{KeyCode, KeyEvent};
///
/// #[tokio::main]
/// async fn main() -> veriscan_hardware::Result<()> {
///     let (mut scanner, handle) = MockScanner::new();
///
///     tokio::spawn(async move {
///         handle.scan("ABC123").await.unwrap();
///     });
///
///     // First event of "ABC123" is the shift press for 'A'
///     let raw = scanner.next_event().await?;
///     assert_eq!(KeyEvent::from_raw(&raw), Some(KeyEvent::down(KeyCode::LeftShift)));
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockScanner {
    /// Channel receiver for simulated events
    event_rx: mpsc::Receiver<RawKeyEvent>,

    /// Device name
    name: String,
}

impl MockScanner {
    /// Create a new mock scanner with the default name.
    ///
    /// Returns a tuple of (MockScanner, MockScannerHandle) where the handle
    /// is used to feed events to the scanner.
    pub fn new() -> (Self, MockScannerHandle) {
        Self::with_name("Mock Scanner".to_string())
    }

    /// Create a new mock scanner with a custom name.
    pub fn with_name(name: String) -> (Self, MockScannerHandle) {
        let (event_tx, event_rx) = mpsc::channel(256);

        let scanner = Self {
            event_rx,
            name: name.clone(),
        };

        let handle = MockScannerHandle { event_tx, name };

        (scanner, handle)
    }
}

impl Default for MockScanner {
    fn default() -> Self {
        Self::new().0
    }
}

impl EventSource for MockScanner {
    async fn next_event(&mut self) -> Result<RawKeyEvent> {
        self.event_rx
            .recv()
            .await
            .ok_or_else(|| crate::HardwareError::disconnected("Scanner event channel closed"))
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new(self.name.clone(), "Mock Scanner v1.0"))
    }
}

/// Handle for driving a mock scanner.
///
/// It can be cloned and shared across tasks.
#[derive(Debug, Clone)]
pub struct MockScannerHandle {
    /// Channel sender for simulated events
    event_tx: mpsc::Sender<RawKeyEvent>,

    /// Device name
    name: String,
}

impl MockScannerHandle {
    /// Send a raw event, including malformed or non-key events.
    ///
    /// # Errors
    ///
    /// Returns an error if the scanner has been dropped and the channel is closed.
    pub async fn send_raw(&self, event: RawKeyEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .await
            .map_err(|_| crate::HardwareError::disconnected("Scanner event channel closed"))
    }

    /// Send a key event.
    ///
    /// # Errors
    ///
    /// Returns an error if the scanner has been dropped and the channel is closed.
    pub async fn send_key(&self, event: KeyEvent) -> Result<()> {
        self.send_raw(event.into()).await
    }

    /// Type `text` without pressing Enter.
    ///
    /// # Errors
    ///
    /// Returns an error if the scanner has been dropped and the channel is closed.
    pub async fn type_text(&self, text: &str) -> Result<()> {
        for event in keystrokes_for(text) {
            self.send_key(event).await?;
        }
        Ok(())
    }

    /// Send a complete scan: `barcode` followed by Enter.
    ///
    /// # Errors
    ///
    /// Returns an error if the scanner has been dropped and the channel is closed.
    pub async fn scan(&self, barcode: &str) -> Result<()> {
        for event in scan_keystrokes(barcode) {
            self.send_key(event).await?;
        }
        Ok(())
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veriscan_core::{KeyCode, KeyKind};

    async fn drain(scanner: &mut MockScanner, count: usize) -> Vec<KeyEvent> {
        let mut events = Vec::with_capacity(count);
        for _ in 0..count {
            let raw = scanner.next_event().await.unwrap();
            events.push(KeyEvent::from_raw(&raw).unwrap());
        }
        events
    }

    #[tokio::test]
    async fn test_mock_scanner_send_key() {
        let (mut scanner, handle) = MockScanner::new();

        handle.send_key(KeyEvent::up(KeyCode::Num5)).await.unwrap();

        let raw = scanner.next_event().await.unwrap();
        assert_eq!(raw, RawKeyEvent::key(6, 0));
    }

    #[tokio::test]
    async fn test_mock_scanner_scan_sequence() {
        let (mut scanner, handle) = MockScanner::new();

        handle.scan("12").await.unwrap();

        let events = drain(&mut scanner, 6).await;
        assert_eq!(events[0], KeyEvent::down(KeyCode::Num1));
        assert_eq!(events[3], KeyEvent::up(KeyCode::Num2));
        assert_eq!(events[5], KeyEvent::new(KeyCode::Enter, KeyKind::Up));
    }

    #[tokio::test]
    async fn test_mock_scanner_type_text_has_no_enter() {
        let (mut scanner, handle) = MockScanner::new();

        handle.type_text("x").await.unwrap();
        drop(handle);

        let events = drain(&mut scanner, 2).await;
        assert!(events.iter().all(|e| e.code == KeyCode::X));
        assert!(scanner.next_event().await.is_err());
    }

    #[tokio::test]
    async fn test_mock_scanner_get_info() {
        let (scanner, handle) = MockScanner::with_name("Bench Scanner".to_string());

        let info = scanner.get_info().await.unwrap();
        assert_eq!(info.name, "Bench Scanner");
        assert_eq!(info.model, "Mock Scanner v1.0");
        assert_eq!(handle.name(), "Bench Scanner");
    }

    #[tokio::test]
    async fn test_mock_scanner_closed_channel() {
        let (mut scanner, handle) = MockScanner::new();

        drop(handle);

        let result = scanner.next_event().await;
        assert!(result.unwrap_err().is_disconnect());
    }

    #[tokio::test]
    async fn test_mock_scanner_handle_closed() {
        let (scanner, handle) = MockScanner::new();

        drop(scanner);

        assert!(handle.scan("ABC").await.is_err());
    }
}

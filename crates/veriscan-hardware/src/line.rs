//! Line-oriented event source.
//!
//! Turns each line read from an async reader (typically stdin) into the key
//! presses a keyboard-emulating scanner would send for it, Enter included.
//! This lets a station run from a terminal or a pipe with no input device.

use std::collections::VecDeque;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{trace, warn};
use veriscan_core::{RawKeyEvent, scan_keystrokes};

use crate::{HardwareError, Result, traits::EventSource, types::DeviceInfo};

/// Event source that replays text lines as scans.
///
/// End of input is reported as a disconnect.
///
/// # Examples
///
/// ```
/// use veriscan_hardware::line::LineEventSource;
/// use veriscan_hardware::traits::EventSource;
/// use veriscan_core::{KeyCode, KeyEvent};
///
/// #[tokio::main]
/// async fn main() -> veriscan_hardware::Result<()> {
///     let mut source = LineEventSource::new(&b"7\n"[..]);
///
///     let raw = source.next_event().await?;
///     assert_eq!(KeyEvent::from_raw(&raw), Some(KeyEvent::down(KeyCode::Num7)));
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct LineEventSource<R> {
    reader: R,
    pending: VecDeque<RawKeyEvent>,
    line: Vec<u8>,
    name: String,
}

impl<R> LineEventSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    /// Create a line source over `reader`.
    pub fn new(reader: R) -> Self {
        Self::with_name(reader, "Line Source")
    }

    /// Create a line source with a custom device name.
    pub fn with_name(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            line: Vec::new(),
            name: name.into(),
        }
    }

    /// Queue the keystrokes for the next line.
    ///
    /// Lines that are not valid UTF-8 cannot come from a keyboard wedge and
    /// are skipped.
    async fn refill(&mut self) -> Result<()> {
        loop {
            self.line.clear();
            let read = self.reader.read_until(b'\n', &mut self.line).await?;
            if read == 0 {
                return Err(HardwareError::disconnected(format!(
                    "{}: end of input",
                    self.name
                )));
            }

            match std::str::from_utf8(&self.line) {
                Ok(text) => {
                    let text = text.trim_end_matches(['\r', '\n']);
                    trace!("Replaying line of {} chars", text.chars().count());
                    self.pending
                        .extend(scan_keystrokes(text).into_iter().map(RawKeyEvent::from));
                    return Ok(());
                }
                Err(e) => warn!("{}: skipping line of {} bytes: {}", self.name, read, e),
            }
        }
    }
}

impl<R> EventSource for LineEventSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_event(&mut self) -> Result<RawKeyEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(event);
            }
            self.refill().await?;
        }
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new(self.name.clone(), "Line replay"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veriscan_core::{KeyCode, KeyEvent};

    async fn collect_until_disconnect<R>(source: &mut LineEventSource<R>) -> Vec<KeyEvent>
    where
        R: AsyncBufRead + Unpin + Send,
    {
        let mut events = Vec::new();
        while let Ok(raw) = source.next_event().await {
            events.push(KeyEvent::from_raw(&raw).unwrap());
        }
        events
    }

    #[tokio::test]
    async fn test_line_becomes_scan() {
        let mut source = LineEventSource::new(&b"ab\n"[..]);

        let events = collect_until_disconnect(&mut source).await;

        assert_eq!(events.len(), 6);
        assert_eq!(events[4], KeyEvent::down(KeyCode::Enter));
        assert_eq!(events[5], KeyEvent::up(KeyCode::Enter));
    }

    #[tokio::test]
    async fn test_crlf_is_stripped() {
        let mut source = LineEventSource::new(&b"1\r\n"[..]);

        let events = collect_until_disconnect(&mut source).await;

        assert_eq!(events.len(), 4);
    }

    #[tokio::test]
    async fn test_empty_line_is_bare_enter() {
        let mut source = LineEventSource::new(&b"\n"[..]);

        let events = collect_until_disconnect(&mut source).await;

        assert_eq!(
            events,
            vec![KeyEvent::down(KeyCode::Enter), KeyEvent::up(KeyCode::Enter)]
        );
    }

    #[tokio::test]
    async fn test_last_line_without_newline() {
        let mut source = LineEventSource::new(&b"1\n2"[..]);

        let events = collect_until_disconnect(&mut source).await;

        assert_eq!(events.len(), 8);
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_skipped() {
        let mut source = LineEventSource::new(&b"1\n\xff\xfe\n2\n"[..]);

        let events = collect_until_disconnect(&mut source).await;

        assert_eq!(
            events,
            vec![
                KeyEvent::down(KeyCode::Num1),
                KeyEvent::up(KeyCode::Num1),
                KeyEvent::down(KeyCode::Enter),
                KeyEvent::up(KeyCode::Enter),
                KeyEvent::down(KeyCode::Num2),
                KeyEvent::up(KeyCode::Num2),
                KeyEvent::down(KeyCode::Enter),
                KeyEvent::up(KeyCode::Enter),
            ]
        );
    }

    #[tokio::test]
    async fn test_end_of_input_is_disconnect() {
        let mut source = LineEventSource::with_name(&b""[..], "stdin");

        let error = source.next_event().await.unwrap_err();
        assert!(error.is_disconnect());
        assert_eq!(source.get_info().await.unwrap().name, "stdin");
    }
}

//! Mock indicator implementation for testing and development.
//!
//! This module provides an indicator that records every command instead of
//! driving lights, and returns immediately from timed operations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::{
    Result,
    traits::IndicatorSink,
    types::{IndicatorColor, IndicatorCommand},
};

#[derive(Debug, Default)]
struct Recorded {
    commands: Vec<IndicatorCommand>,
    lit: Vec<IndicatorColor>,
}

#[derive(Debug, Default)]
struct Shared {
    recorded: Mutex<Recorded>,
    failing: AtomicBool,
}

impl Shared {
    fn recorded(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Mock indicator for testing and development.
///
/// Commands are recorded in order and can be inspected through a
/// `MockIndicatorHandle`. The handle can also make every operation fail,
/// to exercise error paths.
///
/// # Examples
///
/// ```
/// use veriscan_hardware::mock::MockIndicator;
/// use veriscan_hardware::traits::IndicatorSink;
/// use veriscan_hardware::types::{IndicatorColor, IndicatorCommand};
///
/// #[tokio::main]
/// async fn main() -> veriscan_hardware::Result<()> {
///     let (mut indicator, handle) = MockIndicator::new();
///
///     indicator.set_on(IndicatorColor::Yellow).await?;
///
///     assert_eq!(handle.commands(), vec![IndicatorCommand::On { color: IndicatorColor::Yellow }]);
///     assert!(handle.is_lit(IndicatorColor::Yellow));
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockIndicator {
    shared: Arc<Shared>,
}

impl MockIndicator {
    /// Create a new mock indicator and its inspection handle.
    pub fn new() -> (Self, MockIndicatorHandle) {
        let shared = Arc::new(Shared::default());
        let indicator = Self {
            shared: Arc::clone(&shared),
        };
        (indicator, MockIndicatorHandle { shared })
    }

    fn apply(&self, command: IndicatorCommand) -> Result<()> {
        if self.shared.failing.load(Ordering::SeqCst) {
            return Err(crate::HardwareError::communication(format!(
                "mock indicator failure on {command}"
            )));
        }

        let mut recorded = self.shared.recorded();
        match command {
            IndicatorCommand::On { color } => {
                if !recorded.lit.contains(&color) {
                    recorded.lit.push(color);
                }
            }
            IndicatorCommand::Off { color } => recorded.lit.retain(|lit| *lit != color),
            IndicatorCommand::AllOff => recorded.lit.clear(),
            // Timed operations end dark
            IndicatorCommand::Pulse { color, .. } | IndicatorCommand::Blink { color, .. } => {
                recorded.lit.retain(|lit| *lit != color)
            }
        }
        recorded.commands.push(command);
        Ok(())
    }
}

impl Default for MockIndicator {
    fn default() -> Self {
        Self::new().0
    }
}

impl IndicatorSink for MockIndicator {
    async fn pulse(&mut self, color: IndicatorColor, duration: Duration) -> Result<()> {
        self.apply(IndicatorCommand::Pulse { color, duration })
    }

    async fn set_on(&mut self, color: IndicatorColor) -> Result<()> {
        self.apply(IndicatorCommand::On { color })
    }

    async fn set_off(&mut self, color: IndicatorColor) -> Result<()> {
        self.apply(IndicatorCommand::Off { color })
    }

    async fn blink(&mut self, color: IndicatorColor, times: u8) -> Result<()> {
        self.apply(IndicatorCommand::Blink { color, times })
    }

    async fn all_off(&mut self) -> Result<()> {
        self.apply(IndicatorCommand::AllOff)
    }
}

/// Handle for inspecting a mock indicator.
#[derive(Debug, Clone)]
pub struct MockIndicatorHandle {
    shared: Arc<Shared>,
}

impl MockIndicatorHandle {
    /// All commands recorded so far, oldest first.
    pub fn commands(&self) -> Vec<IndicatorCommand> {
        self.shared.recorded().commands.clone()
    }

    /// Remove and return the recorded commands.
    pub fn take_commands(&self) -> Vec<IndicatorCommand> {
        std::mem::take(&mut self.shared.recorded().commands)
    }

    /// Returns `true` if `color` is currently on.
    pub fn is_lit(&self, color: IndicatorColor) -> bool {
        self.shared.recorded().lit.contains(&color)
    }

    /// Make every subsequent operation fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.shared.failing.store(failing, Ordering::SeqCst);
    }
}

//! Device abstraction layer for the verified-read station.
//!
//! This crate provides trait-based abstractions for the two devices a station
//! talks to: the keyboard-emulating barcode scanner ([`EventSource`]) and the
//! tri-color status indicator ([`IndicatorSink`]). These traits enable easy
//! substitution between mock implementations (for development and testing),
//! software stand-ins, and real hardware drivers.
//!
//! # Design Philosophy
//!
//! - **Async-first**: All I/O operations are asynchronous using native `async fn`
//!   in traits (Rust 1.90 + Edition 2024 RPITIT).
//! - **Injected, not detected**: The station never asks whether hardware is
//!   present. The binary selects an implementation once at startup.
//! - **Error-aware**: All operations return `Result<T>` with detailed error information.
//!
//! # Scanner
//!
//! ```no_run
//! use veriscan_hardware::traits::EventSource;
//! use veriscan_hardware::error::Result;
//!
//! async fn count_events<S: EventSource>(source: &mut S) -> Result<usize> {
//!     let mut count = 0;
//!     loop {
//!         match source.next_event().await {
//!             Ok(_) => count += 1,
//!             Err(e) if e.is_disconnect() => return Ok(count),
//!             Err(e) => return Err(e),
//!         }
//!     }
//! }
//! ```
//!
//! # Indicator
//!
//! ```no_run
//! use veriscan_hardware::traits::IndicatorSink;
//! use veriscan_hardware::types::IndicatorColor;
//! use veriscan_hardware::error::Result;
//!
//! async fn confirm<I: IndicatorSink>(indicator: &mut I, count: u8) -> Result<()> {
//!     indicator.all_off().await?;
//!     indicator.blink(IndicatorColor::Green, count).await
//! }
//! ```
//!
//! [`EventSource`]: traits::EventSource
//! [`IndicatorSink`]: traits::IndicatorSink

pub mod devices;
pub mod error;
pub mod indicator;
#[cfg(feature = "hardware-evdev")]
pub mod input;
pub mod line;
pub mod mock;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use devices::{AnyIndicator, IndicatorKind};
pub use error::{HardwareError, Result};
pub use indicator::{LoggingIndicator, NullIndicator};
#[cfg(feature = "hardware-evdev")]
pub use input::EvdevEventSource;
pub use line::LineEventSource;
pub use traits::{EventSource, IndicatorSink};
pub use types::{DeviceInfo, IndicatorColor, IndicatorCommand};

//! Device trait definitions.
//!
//! This module defines the contract between the station core and its two
//! devices: the scanner that produces raw key events, and the tri-color
//! indicator that shows scan status. The station is generic over both, so
//! a mock, a logging stand-in or a real driver can be injected at startup
//! without the core ever checking whether hardware is present.
//!
//! All traits use native `async fn` methods (Rust 1.90 + Edition 2024 RPITIT),
//! eliminating the need for the `async_trait` macro.

#![allow(async_fn_in_trait)]

use std::time::Duration;

use veriscan_core::RawKeyEvent;

use crate::error::Result;
use crate::types::{DeviceInfo, IndicatorColor};

/// Source of raw key events from a keyboard-emulating scanner.
///
/// The station treats the source as a blocking pull: it awaits the next
/// event with no timeout. Discovery, enumeration and reconnect policy belong
/// to whoever constructs the source.
///
/// # Object Safety and Dynamic Dispatch
///
/// **NOTE**: This trait is NOT object-safe because `async fn` methods return
/// `impl Future`. Use generic type parameters, as the station does.
///
/// # Examples
///
/// ```no_run
/// use veriscan_hardware::traits::EventSource;
/// use veriscan_hardware::error::Result;
/// use veriscan_core::KeyEvent;
///
/// async fn next_key<S: EventSource>(source: &mut S) -> Result<KeyEvent> {
///     loop {
///         let raw = source.next_event().await?;
///         if let Some(event) = KeyEvent::from_raw(&raw) {
///             return Ok(event);
///         }
///     }
/// }
/// ```
pub trait EventSource: Send {
    /// Wait for the next raw input event.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The device is disconnected
    /// - An I/O error occurs while reading
    async fn next_event(&mut self) -> Result<RawKeyEvent>;

    /// Get device information.
    ///
    /// # Errors
    ///
    /// Returns an error if a communication error occurs while querying
    /// device information.
    async fn get_info(&self) -> Result<DeviceInfo>;
}

/// Tri-color status indicator.
///
/// Timed operations (`pulse`, `blink`) complete before returning. The station
/// awaits them before reading the next event, so input arriving meanwhile is
/// queued by the transport rather than processed.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use veriscan_hardware::traits::IndicatorSink;
/// use veriscan_hardware::types::IndicatorColor;
/// use veriscan_hardware::error::Result;
///
/// async fn show_pass<I: IndicatorSink>(indicator: &mut I) -> Result<()> {
///     indicator.set_off(IndicatorColor::Yellow).await?;
///     indicator.pulse(IndicatorColor::Green, Duration::from_secs(1)).await
/// }
/// ```
pub trait IndicatorSink: Send + Sync {
    /// Turn `color` on for `duration`, then off.
    ///
    /// # Errors
    ///
    /// Returns an error if the indicator cannot be driven.
    async fn pulse(&mut self, color: IndicatorColor, duration: Duration) -> Result<()>;

    /// Turn `color` on and leave it on.
    ///
    /// # Errors
    ///
    /// Returns an error if the indicator cannot be driven.
    async fn set_on(&mut self, color: IndicatorColor) -> Result<()>;

    /// Turn `color` off.
    ///
    /// # Errors
    ///
    /// Returns an error if the indicator cannot be driven.
    async fn set_off(&mut self, color: IndicatorColor) -> Result<()>;

    /// Blink `color` the given number of times.
    ///
    /// # Errors
    ///
    /// Returns an error if the indicator cannot be driven.
    async fn blink(&mut self, color: IndicatorColor, times: u8) -> Result<()>;

    /// Turn every color off.
    ///
    /// The default implementation switches each color off in turn.
    ///
    /// # Errors
    ///
    /// Returns the first error from switching a color off.
    async fn all_off(&mut self) -> Result<()> {
        for color in IndicatorColor::ALL {
            self.set_off(color).await?;
        }
        Ok(())
    }
}

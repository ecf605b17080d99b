//! Core constants for the verified-read station.
//!
//! This module defines the control barcode vocabulary, the match count
//! bounds, indicator timings and the Linux input constants used to interpret
//! raw events from a keyboard-emulating scanner.
//!
//! # Control Barcodes
//!
//! Control barcodes are reserved strings consumed as commands instead of
//! scan data. They are compared by exact string equality.
//!
//! | Constant | Literal | Effect |
//! |----------|---------|--------|
//! | `BEGIN_PROGRAMMING` | `__BEGINPROG__` | Enter programming mode |
//! | `END_PROGRAMMING` | `__ENDPROG__` | Commit the staged count, return to scanning |
//! | `CANCEL` | `__CANCEL__` | Clear the session, turn indicators off |
//! | `QUIT` | `__STOP__` | Stop the processing loop |
//! | `MATCH_TOKENS` | `__MATCH02__`..`__MATCH08__` | Stage a match count (programming only) |
//!
//! # Usage
//!
//! ```
//! use veriscan_core::constants::*;
//!
//! assert_eq!(QUIT, "__STOP__");
//! assert_eq!(MATCH_TOKENS.len(), (MAX_MATCH_COUNT - MIN_MATCH_COUNT + 1) as usize);
//! ```

// ============================================================================
// Control Barcodes
// ============================================================================

/// Switches the station into programming mode from any mode.
pub const BEGIN_PROGRAMMING: &str = "__BEGINPROG__";

/// Commits the staged match count and returns to scan mode.
///
/// Ignored while already in scan mode.
pub const END_PROGRAMMING: &str = "__ENDPROG__";

/// Clears the in-progress session without changing mode.
pub const CANCEL: &str = "__CANCEL__";

/// Stops the processing loop.
///
/// This is the only intentional termination path for a running station.
pub const QUIT: &str = "__STOP__";

/// Match mode tokens, indexed by `count - MIN_MATCH_COUNT`.
///
/// # Examples
///
/// ```
/// use veriscan_core::constants::{MATCH_TOKENS, MIN_MATCH_COUNT};
///
/// assert_eq!(MATCH_TOKENS[(5 - MIN_MATCH_COUNT) as usize], "__MATCH05__");
/// ```
pub const MATCH_TOKENS: [&str; 7] = [
    "__MATCH02__",
    "__MATCH03__",
    "__MATCH04__",
    "__MATCH05__",
    "__MATCH06__",
    "__MATCH07__",
    "__MATCH08__",
];

// ============================================================================
// Match Counts
// ============================================================================

/// Smallest number of agreeing scans a session may require.
pub const MIN_MATCH_COUNT: u8 = 2;

/// Largest number of agreeing scans a session may require.
pub const MAX_MATCH_COUNT: u8 = 8;

/// Match count used when nothing valid is persisted.
pub const DEFAULT_MATCH_COUNT: u8 = 2;

// ============================================================================
// Indicator Timings
// ============================================================================

/// Duration of the pass/fail pulse in milliseconds.
pub const DEFAULT_PULSE_MS: u64 = 1000;

/// Half period of a confirmation blink in milliseconds.
///
/// Each blink keeps the indicator on for this long, then off for this long.
pub const DEFAULT_BLINK_INTERVAL_MS: u64 = 250;

// ============================================================================
// Linux Input Constants
// ============================================================================

/// Event type of key events (`EV_KEY`).
pub const EV_KEY: u16 = 0x01;

/// Key event value for a released key.
pub const KEY_VALUE_UP: i32 = 0;

/// Key event value for a pressed key.
pub const KEY_VALUE_DOWN: i32 = 1;

/// Key event value for an auto-repeated key.
pub const KEY_VALUE_REPEAT: i32 = 2;

// ============================================================================
// Storage
// ============================================================================

/// Default file name of the persisted match mode.
pub const DEFAULT_STORE_FILE: &str = "current_match_mode.txt";

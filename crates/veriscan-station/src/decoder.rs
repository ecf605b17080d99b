//! Key event decoding.
//!
//! Converts the key presses of a keyboard-emulating scanner into characters
//! and line terminators, tracking which shift keys are held and the caps lock
//! state.
//!
//! # Emission Rules
//!
//! - Printable keys emit on release only, so a press, its auto-repeats and
//!   its release produce exactly one character.
//! - Enter emits a terminator on release.
//! - Shift keys and caps lock never emit.
//! - Unknown keys never emit.
//!
//! # Examples
//!
//! ```
//! use veriscan_core::{KeyCode, KeyEvent};
//! use veriscan_station::{Decoded, KeyEventDecoder};
//!
//! let mut decoder = KeyEventDecoder::new();
//!
//! assert_eq!(decoder.decode(KeyEvent::down(KeyCode::LeftShift)), None);
//! assert_eq!(decoder.decode(KeyEvent::down(KeyCode::A)), None);
//! assert_eq!(decoder.decode(KeyEvent::up(KeyCode::A)), Some(Decoded::Char('A')));
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;
use veriscan_core::{KeyCode, KeyEvent, KeyKind, RawKeyEvent};

/// Output of decoding one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A printable character (or tab).
    Char(char),
    /// End of the current line.
    Terminator,
}

/// Modifier keys currently in effect.
///
/// Shift is tracked per physical key rather than as a counter, so a lost or
/// duplicated release can never leave the decoder stuck shifted or unable
/// to shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModifierState {
    left_shift: bool,
    right_shift: bool,
    caps_active: bool,
}

impl ModifierState {
    /// Returns `true` if any shift key is held.
    #[inline]
    #[must_use]
    pub fn shift_held(&self) -> bool {
        self.left_shift || self.right_shift
    }

    /// Number of shift keys currently held (0-2).
    #[must_use]
    pub fn held_shift_count(&self) -> u8 {
        self.left_shift as u8 + self.right_shift as u8
    }

    /// Returns `true` if caps lock has been toggled on.
    ///
    /// Caps lock is tracked but does not change the emitted characters.
    #[inline]
    #[must_use]
    pub fn caps_active(&self) -> bool {
        self.caps_active
    }

    /// Returns `true` if no modifier is in effect.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }

    fn set_shift(&mut self, key: KeyCode, held: bool) {
        match key {
            KeyCode::LeftShift => self.left_shift = held,
            KeyCode::RightShift => self.right_shift = held,
            _ => {}
        }
    }

    fn toggle_caps(&mut self) {
        self.caps_active = !self.caps_active;
    }
}

/// Stateful decoder from key events to characters.
#[derive(Debug, Clone, Default)]
pub struct KeyEventDecoder {
    modifiers: ModifierState,
}

impl KeyEventDecoder {
    /// Create a decoder with no modifiers in effect.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one key event.
    ///
    /// Total over every input: anything not covered by the emission rules
    /// yields `None`.
    pub fn decode(&mut self, event: KeyEvent) -> Option<Decoded> {
        match (event.code, event.kind) {
            (KeyCode::Enter, KeyKind::Up) => Some(Decoded::Terminator),
            (shift, KeyKind::Down) if shift.is_shift() => {
                self.modifiers.set_shift(shift, true);
                None
            }
            (shift, KeyKind::Up) if shift.is_shift() => {
                self.modifiers.set_shift(shift, false);
                None
            }
            (KeyCode::CapsLock, KeyKind::Up) => {
                self.modifiers.toggle_caps();
                None
            }
            (code, KeyKind::Up) => {
                let (plain, shifted) = code.chars()?;
                Some(Decoded::Char(if self.modifiers.shift_held() {
                    shifted
                } else {
                    plain
                }))
            }
            _ => None,
        }
    }

    /// Decode a raw device event.
    ///
    /// Non-key and malformed events yield `None` without touching state.
    pub fn decode_raw(&mut self, raw: &RawKeyEvent) -> Option<Decoded> {
        match KeyEvent::from_raw(raw) {
            Some(event) => self.decode(event),
            None => {
                trace!(
                    "Skipping event type={} code={} value={}",
                    raw.event_type, raw.code, raw.value
                );
                None
            }
        }
    }

    /// Clear all modifiers. Called after every completed line.
    pub fn reset(&mut self) {
        self.modifiers = ModifierState::default();
    }

    /// Current modifier state.
    pub fn modifiers(&self) -> ModifierState {
        self.modifiers
    }
}

//! Key codes and key events produced by a keyboard-emulating scanner.
//!
//! A scanner in keyboard mode "types" each barcode as a sequence of key
//! presses followed by Enter. This module models those presses using Linux
//! input scancodes, and holds the fixed table that maps each printable key to
//! its unshifted and shifted character (US layout).
//!
//! # Examples
//!
//! ```
//! use veriscan_core::keys::{KeyCode, KeyEvent, KeyKind, RawKeyEvent};
//!
//! let raw = RawKeyEvent::key(30, 0); // KEY_A released
//! let event = KeyEvent::from_raw(&raw).unwrap();
//!
//! assert_eq!(event.code, KeyCode::A);
//! assert_eq!(event.kind, KeyKind::Up);
//! assert_eq!(KeyCode::A.chars(), Some(('a', 'A')));
//! ```

use crate::{
    Result,
    constants::{EV_KEY, KEY_VALUE_DOWN, KEY_VALUE_REPEAT, KEY_VALUE_UP},
    error::Error,
};
use serde::{Deserialize, Serialize};

/// A key recognized by the station, or the raw scancode of one that is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Grave,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Num0,
    Minus,
    Equal,
    Tab,
    Q,
    W,
    E,
    R,
    T,
    Y,
    U,
    I,
    O,
    P,
    LeftBrace,
    RightBrace,
    Backslash,
    A,
    S,
    D,
    F,
    G,
    H,
    J,
    K,
    L,
    Semicolon,
    Apostrophe,
    Z,
    X,
    C,
    V,
    B,
    N,
    M,
    Comma,
    Dot,
    Slash,
    Enter,
    LeftShift,
    RightShift,
    CapsLock,
    /// Any scancode outside the table.
    Unknown(u16),
}

/// Printable keys: (key, Linux scancode, unshifted, shifted).
const PRINTABLE_KEYS: [(KeyCode, u16, char, char); 48] = [
    (KeyCode::Grave, 41, '`', '~'),
    (KeyCode::Num1, 2, '1', '!'),
    (KeyCode::Num2, 3, '2', '@'),
    (KeyCode::Num3, 4, '3', '#'),
    (KeyCode::Num4, 5, '4', '$'),
    (KeyCode::Num5, 6, '5', '%'),
    (KeyCode::Num6, 7, '6', '^'),
    (KeyCode::Num7, 8, '7', '&'),
    (KeyCode::Num8, 9, '8', '*'),
    (KeyCode::Num9, 10, '9', '('),
    (KeyCode::Num0, 11, '0', ')'),
    (KeyCode::Minus, 12, '-', '_'),
    (KeyCode::Equal, 13, '=', '+'),
    (KeyCode::Tab, 15, '\t', '\t'),
    (KeyCode::Q, 16, 'q', 'Q'),
    (KeyCode::W, 17, 'w', 'W'),
    (KeyCode::E, 18, 'e', 'E'),
    (KeyCode::R, 19, 'r', 'R'),
    (KeyCode::T, 20, 't', 'T'),
    (KeyCode::Y, 21, 'y', 'Y'),
    (KeyCode::U, 22, 'u', 'U'),
    (KeyCode::I, 23, 'i', 'I'),
    (KeyCode::O, 24, 'o', 'O'),
    (KeyCode::P, 25, 'p', 'P'),
    (KeyCode::LeftBrace, 26, '[', '{'),
    (KeyCode::RightBrace, 27, ']', '}'),
    (KeyCode::Backslash, 43, '\\', '|'),
    (KeyCode::A, 30, 'a', 'A'),
    (KeyCode::S, 31, 's', 'S'),
    (KeyCode::D, 32, 'd', 'D'),
    (KeyCode::F, 33, 'f', 'F'),
    (KeyCode::G, 34, 'g', 'G'),
    (KeyCode::H, 35, 'h', 'H'),
    (KeyCode::J, 36, 'j', 'J'),
    (KeyCode::K, 37, 'k', 'K'),
    (KeyCode::L, 38, 'l', 'L'),
    (KeyCode::Semicolon, 39, ';', ':'),
    (KeyCode::Apostrophe, 40, '\'', '"'),
    (KeyCode::Z, 44, 'z', 'Z'),
    (KeyCode::X, 45, 'x', 'X'),
    (KeyCode::C, 46, 'c', 'C'),
    (KeyCode::V, 47, 'v', 'V'),
    (KeyCode::B, 48, 'b', 'B'),
    (KeyCode::N, 49, 'n', 'N'),
    (KeyCode::M, 50, 'm', 'M'),
    (KeyCode::Comma, 51, ',', '<'),
    (KeyCode::Dot, 52, '.', '>'),
    (KeyCode::Slash, 53, '/', '?'),
];

const SCANCODE_ENTER: u16 = 28;
const SCANCODE_LEFT_SHIFT: u16 = 42;
const SCANCODE_RIGHT_SHIFT: u16 = 54;
const SCANCODE_CAPS_LOCK: u16 = 58;

impl KeyCode {
    /// Map a Linux input scancode to a key.
    ///
    /// Never fails: unrecognized scancodes become [`KeyCode::Unknown`].
    #[must_use]
    pub fn from_scancode(scancode: u16) -> Self {
        match scancode {
            SCANCODE_ENTER => KeyCode::Enter,
            SCANCODE_LEFT_SHIFT => KeyCode::LeftShift,
            SCANCODE_RIGHT_SHIFT => KeyCode::RightShift,
            SCANCODE_CAPS_LOCK => KeyCode::CapsLock,
            other => PRINTABLE_KEYS
                .iter()
                .find(|(_, code, _, _)| *code == other)
                .map_or(KeyCode::Unknown(other), |(key, _, _, _)| *key),
        }
    }

    /// The Linux input scancode for this key.
    #[must_use]
    pub fn scancode(self) -> u16 {
        match self {
            KeyCode::Enter => SCANCODE_ENTER,
            KeyCode::LeftShift => SCANCODE_LEFT_SHIFT,
            KeyCode::RightShift => SCANCODE_RIGHT_SHIFT,
            KeyCode::CapsLock => SCANCODE_CAPS_LOCK,
            KeyCode::Unknown(code) => code,
            printable => PRINTABLE_KEYS
                .iter()
                .find(|(key, _, _, _)| *key == printable)
                .map_or(0, |(_, code, _, _)| *code),
        }
    }

    /// The (unshifted, shifted) characters for a printable key.
    #[must_use]
    pub fn chars(self) -> Option<(char, char)> {
        PRINTABLE_KEYS
            .iter()
            .find(|(key, _, _, _)| *key == self)
            .map(|(_, _, plain, shifted)| (*plain, *shifted))
    }

    /// Find the key that types `c`, and whether shift must be held.
    ///
    /// Unshifted matches win, so tab is typed without shift.
    #[must_use]
    pub fn for_char(c: char) -> Option<(KeyCode, bool)> {
        PRINTABLE_KEYS.iter().find_map(|(key, _, plain, shifted)| {
            if *plain == c {
                Some((*key, false))
            } else if *shifted == c {
                Some((*key, true))
            } else {
                None
            }
        })
    }

    /// Returns `true` for either shift key.
    #[inline]
    #[must_use]
    pub fn is_shift(self) -> bool {
        matches!(self, KeyCode::LeftShift | KeyCode::RightShift)
    }

    /// Every key with a character mapping.
    pub fn printable() -> impl Iterator<Item = KeyCode> {
        PRINTABLE_KEYS.iter().map(|(key, _, _, _)| *key)
    }
}

/// Phase of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyKind {
    Up,
    Down,
    Repeat,
}

impl KeyKind {
    /// Create a key kind from a Linux input event value.
    ///
    /// # Errors
    /// Returns `Error::InvalidKeyValue` for anything other than 0, 1 or 2.
    pub fn from_value(value: i32) -> Result<Self> {
        match value {
            KEY_VALUE_UP => Ok(KeyKind::Up),
            KEY_VALUE_DOWN => Ok(KeyKind::Down),
            KEY_VALUE_REPEAT => Ok(KeyKind::Repeat),
            other => Err(Error::InvalidKeyValue(other)),
        }
    }

    /// Convert to the Linux input event value.
    #[must_use]
    pub fn to_value(self) -> i32 {
        match self {
            KeyKind::Up => KEY_VALUE_UP,
            KeyKind::Down => KEY_VALUE_DOWN,
            KeyKind::Repeat => KEY_VALUE_REPEAT,
        }
    }
}

/// An input event as read from the device, before interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawKeyEvent {
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}

impl RawKeyEvent {
    /// Create a raw `EV_KEY` event.
    #[must_use]
    pub fn key(code: u16, value: i32) -> Self {
        Self {
            event_type: EV_KEY,
            code,
            value,
        }
    }
}

impl From<KeyEvent> for RawKeyEvent {
    fn from(event: KeyEvent) -> Self {
        RawKeyEvent::key(event.code.scancode(), event.kind.to_value())
    }
}

/// A recognized key event. Immutable, consumed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub kind: KeyKind,
}

impl KeyEvent {
    #[must_use]
    pub fn new(code: KeyCode, kind: KeyKind) -> Self {
        Self { code, kind }
    }

    #[must_use]
    pub fn down(code: KeyCode) -> Self {
        Self::new(code, KeyKind::Down)
    }

    #[must_use]
    pub fn up(code: KeyCode) -> Self {
        Self::new(code, KeyKind::Up)
    }

    /// Interpret a raw device event.
    ///
    /// Returns `None` for non-key events and for key events with an
    /// out-of-range value.
    #[must_use]
    pub fn from_raw(raw: &RawKeyEvent) -> Option<Self> {
        if raw.event_type != EV_KEY {
            return None;
        }
        let kind = KeyKind::from_value(raw.value).ok()?;
        Some(Self::new(KeyCode::from_scancode(raw.code), kind))
    }
}

/// The key presses a keyboard-emulating device sends to type `text`.
///
/// Shifted characters are wrapped in a left-shift press. Characters with no
/// key in the table are skipped.
#[must_use]
pub fn keystrokes_for(text: &str) -> Vec<KeyEvent> {
    let mut events = Vec::with_capacity(text.len() * 2);
    for c in text.chars() {
        let Some((code, shifted)) = KeyCode::for_char(c) else {
            continue;
        };
        if shifted {
            events.push(KeyEvent::down(KeyCode::LeftShift));
        }
        events.push(KeyEvent::down(code));
        events.push(KeyEvent::up(code));
        if shifted {
            events.push(KeyEvent::up(KeyCode::LeftShift));
        }
    }
    events
}

/// The key presses for a complete scan: `text` followed by Enter.
#[must_use]
pub fn scan_keystrokes(text: &str) -> Vec<KeyEvent> {
    let mut events = keystrokes_for(text);
    events.push(KeyEvent::down(KeyCode::Enter));
    events.push(KeyEvent::up(KeyCode::Enter));
    events
}

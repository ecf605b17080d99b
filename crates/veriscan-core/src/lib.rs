pub mod constants;
pub mod error;
pub mod keys;
pub mod types;

pub use error::{Error, Result};
pub use keys::{KeyCode, KeyEvent, KeyKind, RawKeyEvent, keystrokes_for, scan_keystrokes};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

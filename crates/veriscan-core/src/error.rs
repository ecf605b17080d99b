use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Configuration errors
    #[error("Invalid match count: {count} (must be {min}-{max})")]
    InvalidMatchCount { count: u8, min: u8, max: u8 },

    #[error("Unknown match mode token: {0}")]
    UnknownMatchToken(String),

    // Input errors
    #[error("Invalid key event value: {0}")]
    InvalidKeyValue(i32),
}

pub type Result<T> = std::result::Result<T, Error>;

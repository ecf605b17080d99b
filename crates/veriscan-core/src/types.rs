use crate::{
    Result,
    constants::{
        BEGIN_PROGRAMMING, CANCEL, DEFAULT_MATCH_COUNT, END_PROGRAMMING, MATCH_TOKENS,
        MAX_MATCH_COUNT, MIN_MATCH_COUNT, QUIT,
    },
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of consecutive agreeing scans required before a decision (2-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MatchCount(u8);

impl MatchCount {
    /// Create a new match count with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidMatchCount` if the count is outside 2-8.
    pub fn new(count: u8) -> Result<Self> {
        if !(MIN_MATCH_COUNT..=MAX_MATCH_COUNT).contains(&count) {
            return Err(Error::InvalidMatchCount {
                count,
                min: MIN_MATCH_COUNT,
                max: MAX_MATCH_COUNT,
            });
        }
        Ok(MatchCount(count))
    }

    /// Look up the count for a match mode token such as `__MATCH05__`.
    ///
    /// Returns `None` for anything that is not one of the seven tokens.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        MATCH_TOKENS
            .iter()
            .position(|candidate| *candidate == token)
            .map(|offset| MatchCount(MIN_MATCH_COUNT + offset as u8))
    }

    /// The control barcode that stages this count.
    #[must_use]
    pub fn token(self) -> &'static str {
        MATCH_TOKENS[(self.0 - MIN_MATCH_COUNT) as usize]
    }

    /// Get the raw count.
    #[inline]
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Get the count as a `usize`, for comparing against session lengths.
    #[inline]
    #[must_use]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Iterate over every valid count in ascending order.
    pub fn all() -> impl Iterator<Item = MatchCount> {
        (MIN_MATCH_COUNT..=MAX_MATCH_COUNT).map(MatchCount)
    }
}

impl Default for MatchCount {
    fn default() -> Self {
        MatchCount(DEFAULT_MATCH_COUNT)
    }
}

impl fmt::Display for MatchCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for MatchCount {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        MatchCount::new(value)
    }
}

impl From<MatchCount> for u8 {
    fn from(count: MatchCount) -> Self {
        count.0
    }
}

impl std::str::FromStr for MatchCount {
    type Err = Error;

    /// Parses a match mode token (`__MATCH03__`).
    fn from_str(s: &str) -> Result<Self> {
        MatchCount::from_token(s).ok_or_else(|| Error::UnknownMatchToken(s.to_string()))
    }
}

/// A completed scan line.
///
/// Produced once per terminated line. May be empty when the scanner sent
/// Enter without any printable characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Barcode(String);

impl Barcode {
    /// Create a barcode from any string.
    pub fn new(value: impl Into<String>) -> Self {
        Barcode(value.into())
    }

    /// Get the barcode as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the line held no printable characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the barcode, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Barcode {
    fn from(value: &str) -> Self {
        Barcode::new(value)
    }
}

impl From<String> for Barcode {
    fn from(value: String) -> Self {
        Barcode(value)
    }
}

impl PartialEq<str> for Barcode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Barcode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Station run mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Barcodes feed the match engine.
    #[default]
    Scan,
    /// Barcodes stage a new match count.
    Programming,
}

impl Mode {
    /// Returns `true` if the station is scanning.
    #[inline]
    #[must_use]
    pub fn is_scan(self) -> bool {
        matches!(self, Mode::Scan)
    }

    /// Returns `true` if the station is being programmed.
    #[inline]
    #[must_use]
    pub fn is_programming(self) -> bool {
        matches!(self, Mode::Programming)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Scan => write!(f, "Scan"),
            Mode::Programming => write!(f, "Programming"),
        }
    }
}

/// A control barcode recognized by exact string match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlToken {
    BeginProgramming,
    EndProgramming,
    Cancel,
    Quit,
    /// Stage the given match count.
    Match(MatchCount),
}

impl ControlToken {
    /// Recognize a control barcode.
    ///
    /// Returns `None` for ordinary scan data.
    #[must_use]
    pub fn parse(barcode: &str) -> Option<Self> {
        match barcode {
            BEGIN_PROGRAMMING => Some(ControlToken::BeginProgramming),
            END_PROGRAMMING => Some(ControlToken::EndProgramming),
            CANCEL => Some(ControlToken::Cancel),
            QUIT => Some(ControlToken::Quit),
            other => MatchCount::from_token(other).map(ControlToken::Match),
        }
    }

    /// The literal barcode for this token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ControlToken::BeginProgramming => BEGIN_PROGRAMMING,
            ControlToken::EndProgramming => END_PROGRAMMING,
            ControlToken::Cancel => CANCEL,
            ControlToken::Quit => QUIT,
            ControlToken::Match(count) => count.token(),
        }
    }
}

impl fmt::Display for ControlToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

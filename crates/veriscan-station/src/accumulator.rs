//! Line accumulation.
//!
//! Collects decoded characters until a terminator, then yields the line as a
//! [`Barcode`].

use veriscan_core::Barcode;

use crate::decoder::Decoded;

/// Buffer of characters for the line being scanned.
#[derive(Debug, Clone, Default)]
pub struct BarcodeAccumulator {
    buffer: String,
}

impl BarcodeAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one character to the current line.
    pub fn push(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// End the current line, returning it and clearing the buffer.
    ///
    /// The barcode is empty only if nothing was pushed since the last line.
    pub fn finish(&mut self) -> Barcode {
        Barcode::new(std::mem::take(&mut self.buffer))
    }

    /// Feed one decoder output, returning the barcode when a line completes.
    pub fn feed(&mut self, decoded: Decoded) -> Option<Barcode> {
        match decoded {
            Decoded::Char(c) => {
                self.push(c);
                None
            }
            Decoded::Terminator => Some(self.finish()),
        }
    }

    /// Characters of the unfinished line.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Returns `true` if no characters are pending.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_until_terminator() {
        let mut accumulator = BarcodeAccumulator::new();

        for c in "ABC123".chars() {
            assert_eq!(accumulator.feed(Decoded::Char(c)), None);
        }
        assert_eq!(accumulator.pending(), "ABC123");

        let barcode = accumulator.feed(Decoded::Terminator).unwrap();
        assert_eq!(barcode, "ABC123");
        assert!(accumulator.is_empty());
    }

    #[test]
    fn test_empty_line_yields_empty_barcode() {
        let mut accumulator = BarcodeAccumulator::new();

        let barcode = accumulator.feed(Decoded::Terminator).unwrap();
        assert!(barcode.is_empty());
    }

    #[test]
    fn test_consecutive_lines_are_independent() {
        let mut accumulator = BarcodeAccumulator::new();

        accumulator.push('x');
        assert_eq!(accumulator.finish(), "x");

        accumulator.push('y');
        assert_eq!(accumulator.finish(), "y");
    }

    #[test]
    fn test_tab_is_kept_in_line() {
        let mut accumulator = BarcodeAccumulator::new();

        accumulator.push('a');
        accumulator.push('\t');
        accumulator.push('b');

        assert_eq!(accumulator.finish(), "a\tb");
    }
}

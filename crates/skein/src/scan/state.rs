//! The scanner's position bookkeeping: a cursor into the stream plus the
//! human-facing line/column pair, kept equal to what replaying the input
//! from the start would produce.

use crate::scan::Source;

/// A snapshot of the scanner's position and stream bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanState {
    /// Byte offset into the stream; always a valid seek position.
    pub cursor: usize,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
    /// Whether the stream had hit end-of-input when this state was taken.
    pub at_eof: bool,
}

impl ScanState {
    /// The state of a scanner that has consumed nothing.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            cursor: 0,
            line: 1,
            column: 1,
            at_eof: false,
        }
    }

    /// Account for one consumed byte: a newline starts the next line at
    /// column 1, anything else moves one column right.
    pub fn advance(&mut self, byte: u8) {
        self.cursor += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Snap the cursor and stream bits from `source`, optionally overriding
    /// the position counters.
    pub fn reset(&mut self, source: &Source<'_>, line: Option<u32>, column: Option<u32>) {
        self.cursor = source.tell();
        self.at_eof = source.at_eof();
        if let Some(line) = line {
            self.line = line;
        }
        if let Some(column) = column {
            self.column = column;
        }
    }
}

impl Default for ScanState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_tracks_lines_and_columns() {
        let mut state = ScanState::initial();
        state.advance(b'a');
        state.advance(b'b');
        assert_eq!((state.cursor, state.line, state.column), (2, 1, 3));
        state.advance(b'\n');
        assert_eq!((state.cursor, state.line, state.column), (3, 2, 1));
        state.advance(b'x');
        assert_eq!((state.cursor, state.line, state.column), (4, 2, 2));
    }

    #[test]
    fn reset_snaps_to_source() {
        let mut source = Source::new("ab");
        source.get();
        let mut state = ScanState::initial();
        state.reset(&source, Some(5), None);
        assert_eq!(state.cursor, 1);
        assert_eq!(state.line, 5);
        assert_eq!(state.column, 1);
        assert!(!state.at_eof);
    }
}

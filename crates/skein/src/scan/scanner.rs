//! # Scanner
//!
//! A regex-driven tokenizer over a seekable byte stream, with a checkpoint
//! stack for arbitrary-depth backtracking. This is the piece that binds the
//! regex engine to the PEG evaluator: terminals pull tokens with [`next`],
//! and every speculative sequence brackets its work between
//! [`save_checkpoint`] and a restore.
//!
//! Two invariants hold after every public operation:
//!
//! - the stream's read position equals the live state's cursor;
//! - leading delimiter content has been consumed, so the next byte is
//!   either EOF or significant.
//!
//! ## Usage
//!
//! ```
//! use skein::Scanner;
//!
//! let mut scanner = Scanner::new("size: 12 x 8");
//! assert_eq!(scanner.next_word()?, "size");
//! assert_eq!(scanner.read()?, b':');
//! assert_eq!(scanner.next_int()?, 12);
//! assert_eq!(scanner.next_char()?, 'x');
//! assert_eq!(scanner.next_int()?, 8);
//! assert!(scanner.at_eof());
//! # Ok::<(), skein::ScanError>(())
//! ```
//!
//! [`next`]: Scanner::next
//! [`save_checkpoint`]: Scanner::save_checkpoint

use crate::error::{InvalidRegex, ScanError};
use crate::regex::{Regex, WellKnown};
use crate::scan::{ScanState, Source};

/// Opaque handle to a saved scanner state: the depth of the save stack just
/// after the push. Restoring a handle discards every frame above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Tokenizing reader with savepoints.
#[derive(Debug)]
pub struct Scanner<'a> {
    source: Source<'a>,
    delimiter: Regex,
    /// The live position. The saved frames below it are immutable
    /// snapshots.
    current: ScanState,
    saved: Vec<ScanState>,
}

impl<'a> Scanner<'a> {
    /// Scanner over `text` with the default whitespace delimiter (`\s+`).
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self::with_regex(Source::new(text), Regex::well_known(WellKnown::Whitespace))
    }

    /// Scanner with a caller-supplied delimiter pattern.
    pub fn with_delimiter(text: &'a str, pattern: &str) -> Result<Self, InvalidRegex> {
        Ok(Self::with_regex(Source::new(text), Regex::new(pattern)?))
    }

    fn with_regex(source: Source<'a>, delimiter: Regex) -> Self {
        let mut scanner = Self {
            source,
            delimiter,
            current: ScanState::initial(),
            saved: Vec::new(),
        };
        scanner.clear_delimiter_content();
        scanner
    }

    /// The longest prefix of the next token that `pattern` accepts.
    ///
    /// Reads forward to the next delimiter byte, then retracts one byte at
    /// a time until the accumulated token matches. The retraction pass is
    /// what keeps ambiguous delimiters honest: a delimiter may well match a
    /// prefix of the target pattern.
    ///
    /// A pattern that accepts the empty string succeeds with an empty token
    /// when nothing longer matched.
    pub fn next(&mut self, pattern: &Regex) -> Result<String, ScanError> {
        if pattern.front_word_bounded() {
            if let Some(prev) = self.source.prev() {
                if !prev.is_ascii_whitespace() {
                    return Err(ScanError::new(
                        "front word boundary not satisfied",
                        self.current,
                    ));
                }
            }
        }

        // Tokenize: read up to the next single-byte delimiter match.
        let mut cursor = self.source.tell();
        let mut token: Vec<u8> = Vec::new();
        let mut columns: Vec<u32> = vec![0];
        while let Some(byte) = self.source.peek() {
            if self.delimiter.matches_bytes(&[byte], 0) {
                break;
            }
            self.source.get();
            cursor += 1;
            token.push(byte);
            if byte == b'\n' {
                columns.push(0);
            } else if let Some(count) = columns.last_mut() {
                *count += 1;
            }
        }

        let whole = String::from_utf8_lossy(&token).into_owned();

        // Trim: drop trailing bytes until the pattern accepts.
        while !token.is_empty() {
            let back_ok = !pattern.back_word_bounded()
                || self.source.peek().map_or(true, |b| b.is_ascii_whitespace());
            if back_ok && pattern.matches_bytes(&token, 0) {
                let line = self.current.line + (columns.len() as u32 - 1);
                let column = if columns.len() == 1 {
                    self.current.column + columns[0]
                } else {
                    columns.last().copied().unwrap_or(0) + 1
                };
                self.current = ScanState {
                    cursor,
                    line,
                    column,
                    at_eof: self.source.at_eof(),
                };
                let text = String::from_utf8_lossy(&token).into_owned();
                self.clear_delimiter_content();
                return Ok(text);
            }
            if let Some(byte) = token.pop() {
                cursor -= 1;
                self.source.seek(cursor);
                if byte == b'\n' {
                    columns.pop();
                } else if let Some(count) = columns.last_mut() {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Nothing non-empty matched. An ε-accepting pattern still succeeds,
        // consuming nothing.
        if pattern.matches_bytes(b"", 0) {
            self.clear_delimiter_content();
            return Ok(String::new());
        }

        Err(ScanError::new(
            format!("could not match token \"{whole}\""),
            self.current,
        ))
    }

    /// Next token as a signed integer (pool pattern `integral`).
    pub fn next_int(&mut self) -> Result<i64, ScanError> {
        let token = self.next(&Regex::well_known(WellKnown::Integral))?;
        token
            .parse()
            .map_err(|_| ScanError::new(format!("token \"{token}\" overflows an integer"), self.current))
    }

    /// Next token as a floating-point number (pool pattern `float`).
    pub fn next_double(&mut self) -> Result<f64, ScanError> {
        let token = self.next(&Regex::well_known(WellKnown::Float))?;
        token
            .parse()
            .map_err(|_| ScanError::new(format!("token \"{token}\" is not a number"), self.current))
    }

    /// Next run of alphabetic characters (pool pattern `word`).
    pub fn next_word(&mut self) -> Result<String, ScanError> {
        self.next(&Regex::well_known(WellKnown::Word))
    }

    /// Next single character, whatever it is (pool pattern `char`).
    pub fn next_char(&mut self) -> Result<char, ScanError> {
        let token = self.next(&Regex::well_known(WellKnown::Char))?;
        token
            .chars()
            .next()
            .ok_or_else(|| ScanError::new("empty character token", self.current))
    }

    /// Next single letter (pool pattern `letter`).
    pub fn next_letter(&mut self) -> Result<char, ScanError> {
        let token = self.next(&Regex::well_known(WellKnown::Letter))?;
        token
            .chars()
            .next()
            .ok_or_else(|| ScanError::new("empty letter token", self.current))
    }

    /// Remainder of the current line, trailing whitespace stripped, the
    /// newline consumed. Fails if the stream is already at EOF.
    pub fn read_line(&mut self) -> Result<String, ScanError> {
        if self.source.at_eof() {
            return Err(ScanError::new("could not extract line", self.current));
        }
        let mut buffer: Vec<u8> = Vec::new();
        while let Some(byte) = self.source.get() {
            self.current.advance(byte);
            if byte == b'\n' {
                break;
            }
            buffer.push(byte);
        }
        while buffer.last().is_some_and(|b| b.is_ascii_whitespace()) {
            buffer.pop();
        }
        self.current.at_eof = self.source.at_eof();
        let line = String::from_utf8_lossy(&buffer).into_owned();
        self.clear_delimiter_content();
        Ok(line)
    }

    /// Bytes up to and including `delim`, or to EOF. A backslash ahead of
    /// the delimiter escapes it: the pair collapses to the literal
    /// delimiter in the returned buffer.
    pub fn read_until(&mut self, delim: u8) -> String {
        let mut buffer: Vec<u8> = Vec::new();
        while let Some(byte) = self.source.peek() {
            if byte == delim {
                break;
            }
            if let Some(byte) = self.source.get() {
                self.current.advance(byte);
                buffer.push(byte);
                if byte == b'\\' && self.source.peek() == Some(delim) {
                    if let Some(escaped) = self.source.get() {
                        self.current.advance(escaped);
                        if let Some(last) = buffer.last_mut() {
                            *last = escaped;
                        }
                    }
                }
            }
        }
        if let Some(byte) = self.source.get() {
            self.current.advance(byte);
            buffer.push(byte);
        }
        self.clear_delimiter_content();
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Exactly one byte; trailing delimiters are skipped afterwards.
    pub fn read(&mut self) -> Result<u8, ScanError> {
        let Some(byte) = self.source.get() else {
            return Err(ScanError::new("read past end of stream", self.current));
        };
        self.current.advance(byte);
        self.clear_delimiter_content();
        Ok(byte)
    }

    /// The byte `ahead` positions past the cursor, without advancing.
    #[must_use]
    pub fn peek(&self, ahead: usize) -> Option<u8> {
        self.source.peek_at(ahead)
    }

    /// Whether all significant input has been consumed.
    #[must_use]
    pub fn at_eof(&self) -> bool {
        self.source.at_eof()
    }

    /// The live scan state.
    #[must_use]
    pub const fn state(&self) -> ScanState {
        self.current
    }

    /// Number of saved frames below the live state.
    #[must_use]
    pub fn checkpoint_depth(&self) -> usize {
        self.saved.len()
    }

    /// Push a snapshot of the live state and hand back its handle.
    pub fn save_checkpoint(&mut self) -> Checkpoint {
        self.current.cursor = self.source.tell();
        self.saved.push(self.current);
        Checkpoint(self.saved.len())
    }

    /// Pop one frame, restoring the stream's position and bits to it.
    /// No-op when nothing is saved.
    pub fn restore_checkpoint(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.current = state;
            self.source.seek(state.cursor);
        }
    }

    /// Restore to `checkpoint`, discarding it and every frame saved after
    /// it. No-op when the handle is no longer on the stack.
    pub fn restore_to(&mut self, checkpoint: Checkpoint) {
        let depth = checkpoint.0;
        if depth == 0 || depth > self.saved.len() {
            return;
        }
        self.current = self.saved[depth - 1];
        self.saved.truncate(depth - 1);
        self.source.seek(self.current.cursor);
    }

    /// Consume the longest delimiter run under the cursor so `peek` sees
    /// significant content, then re-sync the EOF bit.
    fn clear_delimiter_content(&mut self) {
        let mut separator: Vec<u8> = Vec::new();
        while let Some(byte) = self.source.peek() {
            separator.push(byte);
            if self.delimiter.matches_bytes(&separator, 0) {
                self.source.get();
                self.current.advance(byte);
            } else {
                separator.pop();
                break;
            }
        }
        self.current.at_eof = self.source.at_eof();
    }
}

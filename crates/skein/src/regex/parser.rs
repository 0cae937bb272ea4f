//! Pattern compilation: a hand-rolled lexer/recursive-descent pair that
//! turns the pattern surface into a Thompson NFA.
//!
//! The grammar:
//!
//! ```text
//! regex      := alt
//! alt        := concat ('|' concat)*
//! concat     := piece*
//! piece      := atom quantifier?
//! quantifier := '*' | '+' | '?'
//! atom       := literal | '.' | '[' class ']' | '(' alt ')' | '\' escape
//! class      := classItem+
//! classItem  := char | char '-' char | '\' escape
//! ```

use smallvec::SmallVec;

use crate::automata::{Nfa, CHAR_MAX};
use crate::error::InvalidRegex;

/// Escapes that expand to canonical character classes.
const WHITESPACE: &[(u8, u8)] = &[
    (b' ', b' '),
    (b'\t', b'\t'),
    (0x0b, 0x0b),
    (b'\r', b'\r'),
    (b'\n', b'\n'),
];
const DIGITS: &[(u8, u8)] = &[(b'0', b'9')];
const LOWER: &[(u8, u8)] = &[(b'a', b'z')];
const UPPER: &[(u8, u8)] = &[(b'A', b'Z')];
const ALPHA: &[(u8, u8)] = &[(b'a', b'z'), (b'A', b'Z')];
const ALNUM: &[(u8, u8)] = &[(b'a', b'z'), (b'A', b'Z'), (b'0', b'9')];

/// Metacharacters whose escaped form is the literal character.
const METACHARS: &[u8] = b"|-+*?][\\)(.";

/// Compile `pattern` into an NFA. Error positions are offset by `base` so a
/// pattern stripped of its word-boundary prefix still reports positions in
/// the caller's original text.
pub(crate) fn compile(pattern: &str, base: usize) -> Result<Nfa, InvalidRegex> {
    let mut parser = PatternParser {
        bytes: pattern.as_bytes(),
        pos: 0,
        base,
    };
    let nfa = parser.parse_alt(false)?;
    // parse_alt(false) consumes everything or errors out.
    Ok(nfa)
}

struct PatternParser<'p> {
    bytes: &'p [u8],
    pos: usize,
    base: usize,
}

impl PatternParser<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Position reported in errors: offset into the caller's pattern text.
    fn at(&self) -> usize {
        self.base + self.pos
    }

    fn parse_alt(&mut self, in_group: bool) -> Result<Nfa, InvalidRegex> {
        let mut nfa = self.parse_concat(in_group)?;
        while self.peek() == Some(b'|') {
            self.bump();
            nfa = nfa.alt(self.parse_concat(in_group)?);
        }
        Ok(nfa)
    }

    fn parse_concat(&mut self, in_group: bool) -> Result<Nfa, InvalidRegex> {
        let mut nfa = Nfa::empty();
        loop {
            match self.peek() {
                None => {
                    if in_group {
                        return Err(InvalidRegex::UnbalancedGroup { position: self.at() });
                    }
                    break;
                }
                Some(b')') => {
                    if in_group {
                        break;
                    }
                    return Err(InvalidRegex::UnbalancedGroup { position: self.at() });
                }
                Some(b'|') => break,
                Some(q @ (b'*' | b'+' | b'?')) => {
                    return Err(InvalidRegex::StrayQuantifier {
                        quantifier: q as char,
                        position: self.at(),
                    });
                }
                Some(_) => {
                    let atom = self.parse_atom()?;
                    let atom = self.apply_quantifier(atom);
                    nfa = nfa.concat(atom);
                }
            }
        }
        Ok(nfa)
    }

    fn parse_atom(&mut self) -> Result<Nfa, InvalidRegex> {
        let Some(byte) = self.bump() else {
            // parse_concat never calls through on an empty rest.
            return Err(InvalidRegex::DanglingEscape { position: self.at() });
        };
        match byte {
            b'.' => Ok(Nfa::byte_range(0, CHAR_MAX)),
            b'(' => {
                let inner = self.parse_alt(true)?;
                match self.bump() {
                    Some(b')') => Ok(inner),
                    _ => Err(InvalidRegex::UnbalancedGroup { position: self.at() }),
                }
            }
            b'[' => self.parse_class(),
            b'\\' => Ok(Nfa::from_intervals(&self.escape_intervals()?)),
            literal => Ok(Nfa::literal(literal)),
        }
    }

    fn apply_quantifier(&mut self, atom: Nfa) -> Nfa {
        match self.peek() {
            Some(b'*') => {
                self.bump();
                atom.star()
            }
            Some(b'+') => {
                self.bump();
                atom.plus()
            }
            Some(b'?') => {
                self.bump();
                atom.optional()
            }
            _ => atom,
        }
    }

    fn parse_class(&mut self) -> Result<Nfa, InvalidRegex> {
        let open_pos = self.at() - 1;
        if self.peek() == Some(b']') {
            return Err(InvalidRegex::EmptyClass { position: self.at() });
        }

        let mut intervals: Vec<(u8, u8)> = Vec::new();
        loop {
            match self.peek() {
                None => return Err(InvalidRegex::UnterminatedClass { position: open_pos }),
                Some(b']') => {
                    self.bump();
                    break;
                }
                Some(b'-') => {
                    // A hyphen is only meaningful between two plain
                    // characters; anywhere else it is an error.
                    return Err(InvalidRegex::MisplacedHyphen { position: self.at() });
                }
                Some(b'\\') => {
                    self.bump();
                    intervals.extend(self.escape_intervals()?);
                }
                Some(lo) => {
                    self.bump();
                    if self.peek() == Some(b'-') {
                        self.bump();
                        match self.peek() {
                            None | Some(b']') => {
                                return Err(InvalidRegex::MisplacedHyphen {
                                    position: self.at() - 1,
                                });
                            }
                            Some(hi) => {
                                self.bump();
                                if lo > hi {
                                    return Err(InvalidRegex::ReversedRange {
                                        lo: lo as char,
                                        hi: hi as char,
                                        position: self.at() - 1,
                                    });
                                }
                                intervals.push((lo, hi));
                            }
                        }
                    } else {
                        intervals.push((lo, lo));
                    }
                }
            }
        }

        Ok(Nfa::from_intervals(&intervals))
    }

    /// The intervals an escape expands to; shared between atom and class
    /// positions.
    fn escape_intervals(&mut self) -> Result<SmallVec<[(u8, u8); 4]>, InvalidRegex> {
        let position = self.at();
        let Some(byte) = self.bump() else {
            return Err(InvalidRegex::DanglingEscape { position });
        };
        let expansion: &[(u8, u8)] = match byte {
            b's' => WHITESPACE,
            b'd' => DIGITS,
            b'a' => LOWER,
            b'U' => UPPER,
            b'A' => ALPHA,
            b'w' => ALNUM,
            meta if METACHARS.contains(&meta) => return Ok(SmallVec::from_slice(&[(meta, meta)])),
            other => {
                return Err(InvalidRegex::UnknownEscape {
                    escape: other as char,
                    position,
                });
            }
        };
        Ok(SmallVec::from_slice(expansion))
    }
}

//! # Checkpointed Scanning
//!
//! A cursor over a fully available input stream, tokenized by a delimiter
//! regex, with line/column tracking and a stack of savepoints that the PEG
//! evaluator leans on for backtracking.

mod scanner;
mod source;
mod state;

pub use scanner::{Checkpoint, Scanner};
pub use source::Source;
pub use state::ScanState;

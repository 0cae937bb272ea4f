//! CLI interface for the skein toolkit.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skein")]
#[command(about = "Regex matching and PEG parsing from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse an input file against a grammar description and print the
    /// resulting tree.
    Parse {
        /// Grammar description file (one rule per line, `Name' -> ...`)
        grammar: PathBuf,

        /// Input file; stdin when omitted
        input: Option<PathBuf>,
    },

    /// Test whether a string matches a pattern exactly.
    Match {
        /// Pattern in the engine's regex surface
        pattern: String,

        /// Text to match against
        text: String,

        /// Offset to anchor the match at
        #[arg(short, long, default_value_t = 0)]
        offset: usize,
    },

    /// Find the first offset where a pattern matches.
    Find {
        /// Pattern in the engine's regex surface
        pattern: String,

        /// Text to search
        text: String,
    },
}

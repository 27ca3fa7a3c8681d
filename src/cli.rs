//! Command-line interface definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse verse references, repair speech transcripts and grade recitations
#[derive(Parser, Debug)]
#[command(name = "versecheck", version, about)]
pub struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a reference into book, chapter and verses
    Parse {
        /// Reference such as "2 Corinthians 5:17-18"
        reference: String,
    },

    /// Strictly validate a reference, listing every problem
    Validate {
        /// Reference as typed by a user
        reference: String,
    },

    /// Sort references into canonical book order
    Sort {
        /// References to sort
        #[arg(required = true)]
        references: Vec<String>,

        /// Group the output by testament
        #[arg(short, long)]
        testament: bool,
    },

    /// Repair a speech transcript against a known reference
    Normalize {
        /// Reference being recited
        #[arg(short, long)]
        reference: String,

        /// Raw recognizer output
        transcript: String,
    },

    /// Grade a recitation
    Grade {
        /// Reference being recited
        #[arg(short, long)]
        reference: String,

        /// Verse text to compare against (skips the library lookup)
        #[arg(long, conflicts_with = "library")]
        text: Option<String>,

        /// JSON verse library (default: $VERSECHECK_LIBRARY)
        #[arg(short, long)]
        library: Option<PathBuf>,

        /// What the reciter said
        transcript: String,
    },

    /// List built-in memory verse sets
    Curriculum {
        /// Show only this set
        set: Option<String>,
    },
}

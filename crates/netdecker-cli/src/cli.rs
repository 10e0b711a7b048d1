use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// Turn recorded OCR output of deck list screenshots into importable deck lists.
#[derive(Debug, Parser)]
#[command(name = "netdecker", about, version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a deck list from a Google Cloud Vision response
    Parse {
        /// Path to the Vision `images:annotate` response (JSON)
        #[arg(value_name = "OCR_JSON")]
        file: PathBuf,

        /// Path to a Scryfall oracle-cards bulk file (JSON)
        #[arg(long, value_name = "CARDS_JSON")]
        cards: PathBuf,

        /// Constructed format the deck list is for
        #[arg(long)]
        format: String,

        /// Alias file (JSON) read before parsing and rewritten with learned aliases afterwards
        #[arg(long, value_name = "ALIASES_JSON")]
        aliases: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = DeckFormat::Text)]
        output: DeckFormat,

        /// Vertical tolerance for line assembly, in pixels (default: 3)
        #[arg(long, default_value_t = 3)]
        y_tolerance: i32,
    },

    /// Print the text lines assembled from a Google Cloud Vision response
    Lines {
        /// Path to the Vision `images:annotate` response (JSON)
        #[arg(value_name = "OCR_JSON")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,

        /// Vertical tolerance for line assembly, in pixels (default: 3)
        #[arg(long, default_value_t = 3)]
        y_tolerance: i32,
    },

    /// List the supported constructed formats
    Formats,
}

/// Output format for the parse subcommand.
#[derive(Debug, Clone, ValueEnum)]
pub enum DeckFormat {
    /// Plain-text import format
    Text,
    /// JSON output
    Json,
}

/// Output format for the lines subcommand.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text (tab-separated)
    Text,
    /// JSON output
    Json,
    /// CSV output
    Csv,
}

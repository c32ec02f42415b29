//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Frame and unframe byte streams as netstrings.
#[derive(Debug, Parser)]
#[command(name = "garlic", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write each input as one netstring to stdout.
    Encode {
        /// Frame every input line separately instead of whole inputs.
        #[arg(long)]
        lines: bool,
        /// Input files; stdin when empty.
        files: Vec<PathBuf>,
    },

    /// Read netstrings from stdin and write their payloads to stdout.
    Decode {
        /// Largest payload accepted, in bytes.
        #[arg(long, env = "GARLIC_MAX_LEN")]
        max_len: Option<u64>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Raw)]
        format: OutputFormat,
    },
}

/// How decoded payloads are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Payload bytes followed by a newline.
    Raw,
    /// One JSON object per frame.
    Json,
}

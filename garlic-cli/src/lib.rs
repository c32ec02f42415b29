//! Command-line front-end for the garlic netstring codec.
//!
//! `garlic encode` frames files or stdin as netstrings; `garlic decode`
//! unframes a netstring stream from stdin as raw payloads or JSON reports.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{Cli, Command, OutputFormat};
pub use commands::{decode_stream, encode_stream, run, FrameReport};
pub use error::CliError;

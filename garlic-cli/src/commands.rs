//! `encode` and `decode` subcommands.
//!
//! Both operate on generic readers and writers so they can be driven from
//! stdin/stdout by the binary and from memory in tests.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use base64::Engine as _;
use garlic_netstring::{encode, DecoderConfig, NetstringReader};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::cli::{Cli, Command, OutputFormat};
use crate::CliError;

/// JSON description of one decoded frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    /// Zero-based position in the stream.
    pub index: u64,
    /// Payload length in bytes.
    pub len: u64,
    /// Lowercase hex SHA-256 of the payload.
    pub sha256: String,
    /// Payload, standard base64.
    pub payload: String,
}

impl FrameReport {
    /// Describe `payload` found at `index`.
    #[must_use]
    pub fn new(index: u64, payload: &[u8]) -> Self {
        let digest = Sha256::digest(payload);
        let mut sha256 = String::with_capacity(64);
        for byte in digest {
            sha256.push_str(&format!("{byte:02x}"));
        }
        Self {
            index,
            len: payload.len() as u64,
            sha256,
            payload: base64::engine::general_purpose::STANDARD.encode(payload),
        }
    }
}

/// Frame `input` onto `out` and return the number of frames written.
///
/// With `lines`, each line (without `\n` or `\r\n`) is one frame; otherwise
/// the whole input is a single frame.
///
/// # Errors
/// Returns [`CliError::Io`] on read or write failure.
pub fn encode_stream<R: BufRead, W: Write>(mut input: R, lines: bool, out: &mut W) -> Result<u64, CliError> {
    if !lines {
        let mut payload = Vec::new();
        input.read_to_end(&mut payload)?;
        encode(out, &payload)?;
        return Ok(1);
    }

    let mut frames = 0;
    for line in input.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        encode(out, &line)?;
        frames += 1;
    }
    Ok(frames)
}

/// Decode netstrings from `input` until clean end of input and write each
/// payload to `out` in `format`. Returns the number of frames decoded.
///
/// # Errors
/// Returns [`CliError::Decode`] for the first malformed or oversized frame.
pub fn decode_stream<R: Read, W: Write>(
    input: R,
    config: DecoderConfig,
    format: OutputFormat,
    out: &mut W,
) -> Result<u64, CliError> {
    let mut reader = NetstringReader::with_config(input, config);
    loop {
        let index = reader.frames_read();
        let payload = match reader.next_frame() {
            Ok(Some(payload)) => payload,
            Ok(None) => return Ok(index),
            Err(source) => return Err(CliError::Decode { index, source }),
        };
        match format {
            OutputFormat::Raw => {
                out.write_all(&payload)?;
                out.write_all(b"\n")?;
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &FrameReport::new(index, &payload))?;
                out.write_all(b"\n")?;
            }
        }
    }
}

/// Execute a parsed command line against stdin and stdout.
///
/// # Errors
/// Any [`CliError`] raised by the subcommand.
pub fn run(cli: Cli) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Command::Encode { lines, files } => {
            let frames = if files.is_empty() {
                encode_stream(io::stdin().lock(), lines, &mut out)?
            } else {
                let mut total = 0;
                for path in files {
                    let file = open(path)?;
                    total += encode_stream(BufReader::new(file), lines, &mut out)?;
                }
                total
            };
            tracing::debug!(frames, "encoded");
        }
        Command::Decode { max_len, format } => {
            let config = max_len.map_or_else(DecoderConfig::default, DecoderConfig::with_max_len);
            tracing::debug!(max_len = config.max_len, ?format, "decoding stdin");
            let frames = decode_stream(io::stdin().lock(), config, format, &mut out)?;
            tracing::debug!(frames, "decoded");
        }
    }

    out.flush()?;
    Ok(())
}

fn open(path: PathBuf) -> Result<File, CliError> {
    File::open(&path).map_err(|source| CliError::Open { path, source })
}

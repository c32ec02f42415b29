//! Error types for the CLI crate.

use std::path::PathBuf;

/// Errors that end a `garlic` invocation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CliError {
    /// An input file could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Decoding frame number `index` (zero-based) failed.
    #[error("frame {index}: {source}")]
    Decode {
        index: u64,
        #[source]
        source: garlic_netstring::Error,
    },

    /// Serializing a frame report failed.
    #[error("json output: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading input or writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display_names_the_frame() {
        let err = CliError::Decode { index: 3, source: garlic_netstring::Error::Syntax };
        assert_eq!(err.to_string(), "frame 3: malformed netstring");
    }

    #[test]
    fn open_error_display_includes_path() {
        let err = CliError::Open {
            path: PathBuf::from("missing.bin"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("cannot open missing.bin"));
    }
}

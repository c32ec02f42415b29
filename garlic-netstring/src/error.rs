//! Error types for the netstring crate.

use std::io;

/// Errors that can occur while decoding a netstring.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The underlying reader returned an error, including unexpected EOF
    /// inside the length prefix or before the terminating comma.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The payload was shorter than the length prefix announced.
    #[error("netstring payload ended before the announced length")]
    Incomplete,

    /// The announced length was rejected by the caller's predicate.
    #[error("netstring length {0} was rejected")]
    Length(u64),

    /// The announced length does not fit in a `u64`.
    #[error("netstring length overflows u64")]
    Overflow,

    /// A byte other than a digit or `:` appeared in the length prefix, or the
    /// payload was not followed by `,`.
    #[error("malformed netstring")]
    Syntax,
}

impl Error {
    /// Returns `true` if the error was caused by the input ending early.
    #[must_use]
    pub fn is_truncation(&self) -> bool {
        match self {
            Error::Incomplete => true,
            Error::Io(e) => e.kind() == io::ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_error_display_includes_value() {
        let msg = Error::Length(42).to_string();
        assert!(msg.contains("42"), "Display must include the rejected length, got {msg}");
    }

    #[test]
    fn io_error_converts_via_from() {
        let err: Error = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_truncation(), "unexpected EOF must count as truncation");
    }

    #[test]
    fn syntax_is_not_truncation() {
        assert!(!Error::Syntax.is_truncation());
        assert!(!Error::Overflow.is_truncation());
        assert!(Error::Incomplete.is_truncation());
    }
}

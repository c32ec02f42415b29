//! Blocking netstring decoder over [`std::io::Read`].

use std::io::Read;

use crate::Error;

/// The byte that terminates the length prefix.
pub(crate) const COLON: u8 = b':';

/// The byte that terminates the payload.
pub(crate) const COMMA: u8 = b',';

/// Incremental parser for the `<digits>:` length prefix.
///
/// Shared by the blocking, streaming and async decoders so all three agree
/// on overflow and syntax handling.
#[derive(Debug, Default)]
pub(crate) struct LengthPrefix {
    len: u64,
}

impl LengthPrefix {
    /// Feed one byte. Returns `Some(len)` once the terminating `:` is seen.
    ///
    /// # Errors
    /// Returns [`Error::Overflow`] if the digits exceed `u64::MAX` and
    /// [`Error::Syntax`] on any byte that is neither a digit nor `:`.
    pub(crate) fn push(&mut self, byte: u8) -> Result<Option<u64>, Error> {
        match byte {
            b'0'..=b'9' => {
                let digit = u64::from(byte - b'0');
                self.len = self
                    .len
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit))
                    .ok_or(Error::Overflow)?;
                Ok(None)
            }
            COLON => Ok(Some(self.len)),
            _ => Err(Error::Syntax),
        }
    }
}

/// Decode a netstring.
///
/// First the length prefix is read. If it passes the predicate `accept`, the
/// payload is appended to `buf`. On success the reader is left immediately
/// after the terminating comma and the payload length is returned.
///
/// # Errors
/// - [`Error::Length`] if `accept` rejects the length; nothing past the `:`
///   has been consumed.
/// - [`Error::Incomplete`] if the input ends inside the payload.
/// - [`Error::Syntax`] on a malformed prefix or a missing comma.
/// - [`Error::Overflow`] if the prefix does not fit in a `u64`.
/// - [`Error::Io`] on reader failure, including EOF inside the prefix or
///   before the comma.
pub fn decode<R, F>(r: &mut R, accept: F, buf: &mut Vec<u8>) -> Result<u64, Error>
where
    R: Read,
    F: FnOnce(u64) -> bool,
{
    let len = decode_len(r)?;
    if !accept(len) {
        return Err(Error::Length(len));
    }
    read_body(r, len, buf)?;
    Ok(len)
}

/// Read the `<digits>:` length prefix and return the announced length.
///
/// # Errors
/// See [`decode`].
pub fn decode_len<R: Read>(r: &mut R) -> Result<u64, Error> {
    let mut prefix = LengthPrefix::default();
    let mut byte = [0u8];
    loop {
        r.read_exact(&mut byte)?;
        if let Some(len) = prefix.push(byte[0])? {
            return Ok(len);
        }
    }
}

/// Read `len` payload bytes into `buf` followed by the terminating comma.
pub(crate) fn read_body<R: Read>(r: &mut R, len: u64, buf: &mut Vec<u8>) -> Result<(), Error> {
    let nread = r.by_ref().take(len).read_to_end(buf)?;
    if nread as u64 != len {
        return Err(Error::Incomplete);
    }

    let mut comma = [0u8];
    r.read_exact(&mut comma)?;
    if comma[0] != COMMA {
        return Err(Error::Syntax);
    }
    Ok(())
}

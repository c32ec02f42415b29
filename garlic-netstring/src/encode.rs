//! Netstring encoder over [`std::io::Write`].

use std::io::{self, Write};

use crate::decode::{COLON, COMMA};

/// Number of decimal digits needed to print `n`.
fn digit_count(mut n: u64) -> u64 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Size in bytes of the netstring framing a payload of `payload_len` bytes.
///
/// Saturates at `u64::MAX` for lengths that cannot be framed in memory anyway.
///
/// # Complexity
/// O(log10 n).
#[must_use]
pub fn encoded_len(payload_len: u64) -> u64 {
    payload_len.saturating_add(digit_count(payload_len) + 2)
}

/// Write `payload` as a single netstring and return the number of bytes written.
///
/// # Errors
/// Propagates any error from the writer.
pub fn encode<W: Write>(w: &mut W, payload: &[u8]) -> io::Result<u64> {
    let len = payload.len() as u64;
    write!(w, "{len}")?;
    w.write_all(&[COLON])?;
    w.write_all(payload)?;
    w.write_all(&[COMMA])?;
    Ok(encoded_len(len))
}

/// Frame `payload` into a freshly allocated netstring.
#[must_use]
pub fn to_vec(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 22);
    out.extend_from_slice(payload.len().to_string().as_bytes());
    out.push(COLON);
    out.extend_from_slice(payload);
    out.push(COMMA);
    out
}

//! Async netstring codec over tokio's `AsyncRead` / `AsyncWrite`.
//!
//! Semantics match [`crate::decode`] and [`crate::encode`] exactly.
//!
//! # Cancel Safety
//! Not cancel safe. Dropping a future mid-frame leaves the reader positioned
//! inside the frame.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::decode::{LengthPrefix, COLON, COMMA};
use crate::{encoded_len, Error};

/// Decode one netstring from an async reader.
///
/// # Errors
/// Same as [`crate::decode`].
pub async fn decode_async<R, F>(r: &mut R, accept: F, buf: &mut Vec<u8>) -> Result<u64, Error>
where
    R: AsyncRead + Unpin,
    F: FnOnce(u64) -> bool,
{
    let mut prefix = LengthPrefix::default();
    let len = loop {
        let byte = r.read_u8().await?;
        if let Some(len) = prefix.push(byte)? {
            break len;
        }
    };
    if !accept(len) {
        return Err(Error::Length(len));
    }

    let nread = (&mut *r).take(len).read_to_end(buf).await?;
    if nread as u64 != len {
        return Err(Error::Incomplete);
    }
    if r.read_u8().await? != COMMA {
        return Err(Error::Syntax);
    }
    Ok(len)
}

/// Write `payload` as one netstring to an async writer.
///
/// Does not flush.
///
/// # Errors
/// Propagates any error from the writer.
pub async fn encode_async<W>(w: &mut W, payload: &[u8]) -> std::io::Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let len = payload.len() as u64;
    w.write_all(len.to_string().as_bytes()).await?;
    w.write_all(&[COLON]).await?;
    w.write_all(payload).await?;
    w.write_all(&[COMMA]).await?;
    Ok(encoded_len(len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn decodes_from_async_reader() {
        let mut input: &[u8] = b"13:Hello, world!,X";
        let mut buf = Vec::new();
        let len = decode_async(&mut input, |_| true, &mut buf).await;
        assert_eq!(len.ok(), Some(13));
        assert_eq!(buf, b"Hello, world!");
        assert_eq!(input, b"X", "reader must stop right after the comma");
    }

    #[tokio::test]
    async fn async_errors_match_blocking_decoder() {
        let cases: &[&[u8]] = &[b"", b"1:A", b"1:AB,", b"1:,", b"A:1,", b"5:abc"];
        for &case in cases {
            let mut blocking_buf = Vec::new();
            let blocking = crate::decode(&mut std::io::Cursor::new(case), |_| true, &mut blocking_buf);

            let mut input = case;
            let mut async_buf = Vec::new();
            let nonblocking = decode_async(&mut input, |_| true, &mut async_buf).await;

            assert_eq!(
                blocking.err().as_ref().map(std::mem::discriminant),
                nonblocking.err().as_ref().map(std::mem::discriminant),
                "decoders disagree on {case:?}"
            );
        }
    }

    #[tokio::test]
    async fn rejected_length_reads_no_payload() {
        let mut input: &[u8] = b"3:abc,";
        let mut buf = Vec::new();
        let result = decode_async(&mut input, |len| len < 3, &mut buf).await;
        assert!(matches!(result, Err(Error::Length(3))), "got {result:?}");
        assert_eq!(input, b"abc,");
    }

    #[tokio::test]
    async fn encode_then_decode_over_duplex_pipe() {
        let (mut client, mut server) = tokio::io::duplex(64);
        let writer = tokio::spawn(async move {
            for payload in [&b"alpha"[..], b"", b"gamma"] {
                encode_async(&mut client, payload).await?;
            }
            client.shutdown().await
        });

        let mut frames = Vec::new();
        for _ in 0..3 {
            let mut buf = Vec::new();
            let result = decode_async(&mut server, |_| true, &mut buf).await;
            assert!(result.is_ok(), "decode failed: {result:?}");
            frames.push(buf);
        }

        let joined = writer.await;
        assert!(matches!(joined, Ok(Ok(()))), "writer task failed: {joined:?}");
        assert_eq!(frames, vec![b"alpha".to_vec(), Vec::new(), b"gamma".to_vec()]);
    }
}

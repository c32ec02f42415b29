//! Streaming reader that yields successive netstrings from one source.

use std::io::{self, Read};

use crate::decode::{read_body, LengthPrefix};
use crate::{DecoderConfig, Error};

/// Decodes a stream of back-to-back netstrings.
///
/// End of input exactly on a frame boundary is a clean finish
/// ([`NetstringReader::next_frame`] returns `Ok(None)`); end of input
/// anywhere inside a frame is an error. After the first error the reader is
/// fused and yields nothing further.
#[derive(Debug)]
pub struct NetstringReader<R> {
    inner: R,
    config: DecoderConfig,
    frames_read: u64,
    done: bool,
}

impl<R: Read> NetstringReader<R> {
    /// Wrap `inner` with the default [`DecoderConfig`].
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, DecoderConfig::default())
    }

    /// Wrap `inner` with an explicit config.
    #[must_use]
    pub fn with_config(inner: R, config: DecoderConfig) -> Self {
        Self { inner, config, frames_read: 0, done: false }
    }

    /// Number of frames successfully decoded so far.
    #[must_use]
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Unwrap the reader, returning the underlying source.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Decode the next frame.
    ///
    /// # Errors
    /// Any [`Error`] from the frame; a frame longer than
    /// [`DecoderConfig::max_len`] fails with [`Error::Length`].
    pub fn next_frame(&mut self) -> Result<Option<Vec<u8>>, Error> {
        if self.done {
            return Ok(None);
        }
        let result = self.read_frame();
        match &result {
            Ok(Some(payload)) => {
                self.frames_read += 1;
                tracing::trace!(index = self.frames_read - 1, len = payload.len(), "decoded netstring");
            }
            Ok(None) => {
                self.done = true;
                tracing::debug!(frames = self.frames_read, "netstring stream finished");
            }
            Err(e) => {
                self.done = true;
                tracing::debug!(frames = self.frames_read, error = %e, "netstring stream failed");
            }
        }
        result
    }

    fn read_frame(&mut self) -> Result<Option<Vec<u8>>, Error> {
        let Some(first) = self.read_first_byte()? else {
            return Ok(None);
        };

        let mut prefix = LengthPrefix::default();
        let mut next = first;
        let len = loop {
            if let Some(len) = prefix.push(next)? {
                break len;
            }
            let mut byte = [0u8];
            self.inner.read_exact(&mut byte)?;
            next = byte[0];
        };

        if !self.config.accepts(len) {
            return Err(Error::Length(len));
        }

        let mut payload = Vec::new();
        read_body(&mut self.inner, len, &mut payload)?;
        Ok(Some(payload))
    }

    /// Read one byte, distinguishing a clean EOF from a read error.
    fn read_first_byte(&mut self) -> Result<Option<u8>, Error> {
        let mut byte = [0u8];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read> Iterator for NetstringReader<R> {
    type Item = Result<Vec<u8>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}

//! Sequential byte sources the decoder reads from.
//!
//! A ZTEX file is consumed strictly front to back: header, optional palette,
//! skipped mip levels, then level 0. [`SliceSource`] serves in-memory data and
//! can lend level-0 bytes without copying; [`ReaderSource`] wraps any
//! [`std::io::Read`] and always copies.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::error::ZtexError;

/// Forward-only input for the decoder.
///
/// Implementations must fail with [`ZtexError::UnexpectedEof`] (or an I/O
/// error) rather than return fewer bytes than requested.
pub trait ByteSource<'a> {
    /// Fill `buf` completely.
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ZtexError>;

    /// Take the next `n` bytes, borrowed when the source allows it.
    fn take(&mut self, n: usize) -> Result<Cow<'a, [u8]>, ZtexError>;

    /// Discard the next `n` bytes.
    fn skip(&mut self, n: usize) -> Result<(), ZtexError>;

    /// Append everything left in the source to `sink`, returning the count.
    ///
    /// With `max` set, fails with [`ZtexError::LimitExceeded`] once more than
    /// `max` bytes are available, having read at most `max + 1` of them.
    fn read_remaining(
        &mut self,
        sink: &mut Vec<u8>,
        max: Option<usize>,
    ) -> Result<usize, ZtexError>;

    /// Bytes consumed so far.
    fn position(&self) -> u64;

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], ZtexError> {
        let mut buf = [0u8; N];
        self.read_exact_bytes(&mut buf)?;
        Ok(buf)
    }
}

fn remaining_exceeds(max: usize) -> ZtexError {
    ZtexError::LimitExceeded(alloc::format!(
        "remaining input exceeds limit of {max} bytes"
    ))
}

// ── In-memory ───────────────────────────────────────────────────────

/// Cursor over a byte slice.
#[derive(Clone, Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    fn advance(&mut self, n: usize) -> Result<&'a [u8], ZtexError> {
        let end = self.pos.checked_add(n).ok_or(ZtexError::UnexpectedEof)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(ZtexError::UnexpectedEof)?;
        self.pos = end;
        Ok(bytes)
    }
}

impl<'a> ByteSource<'a> for SliceSource<'a> {
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ZtexError> {
        let bytes = self.advance(buf.len())?;
        buf.copy_from_slice(bytes);
        Ok(())
    }

    fn take(&mut self, n: usize) -> Result<Cow<'a, [u8]>, ZtexError> {
        self.advance(n).map(Cow::Borrowed)
    }

    fn skip(&mut self, n: usize) -> Result<(), ZtexError> {
        self.advance(n).map(|_| ())
    }

    fn read_remaining(
        &mut self,
        sink: &mut Vec<u8>,
        max: Option<usize>,
    ) -> Result<usize, ZtexError> {
        let rest = self.remaining();
        if let Some(max) = max {
            if rest.len() > max {
                return Err(remaining_exceeds(max));
            }
        }
        sink.extend_from_slice(rest);
        self.pos = self.data.len();
        Ok(rest.len())
    }

    fn position(&self) -> u64 {
        self.pos as u64
    }
}

// ── std::io ─────────────────────────────────────────────────────────

/// Adapter over a blocking [`std::io::Read`].
///
/// Reads are issued only as far as the decoder needs; the reader is not
/// buffered here, so wrap slow readers in a `BufReader`.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
    pos: u64,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }
}

#[cfg(feature = "std")]
impl<'a, R: std::io::Read> ByteSource<'a> for ReaderSource<R> {
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ZtexError> {
        self.inner.read_exact(buf)?;
        self.pos += buf.len() as u64;
        Ok(())
    }

    fn take(&mut self, n: usize) -> Result<Cow<'a, [u8]>, ZtexError> {
        use std::io::Read;

        // Grow with the data instead of trusting `n` up front.
        let mut buf = Vec::with_capacity(n.min(1 << 20));
        let read = (&mut self.inner).take(n as u64).read_to_end(&mut buf)?;
        self.pos += read as u64;
        if read != n {
            return Err(ZtexError::UnexpectedEof);
        }
        Ok(Cow::Owned(buf))
    }

    fn skip(&mut self, n: usize) -> Result<(), ZtexError> {
        use std::io::Read;

        let skipped = std::io::copy(&mut (&mut self.inner).take(n as u64), &mut std::io::sink())?;
        self.pos += skipped;
        if skipped != n as u64 {
            return Err(ZtexError::UnexpectedEof);
        }
        Ok(())
    }

    fn read_remaining(
        &mut self,
        sink: &mut Vec<u8>,
        max: Option<usize>,
    ) -> Result<usize, ZtexError> {
        use std::io::Read;

        let read = match max {
            Some(max) => (&mut self.inner)
                .take((max as u64).saturating_add(1))
                .read_to_end(sink)?,
            None => self.inner.read_to_end(sink)?,
        };
        self.pos += read as u64;
        match max {
            Some(max) if read > max => Err(remaining_exceeds(max)),
            _ => Ok(read),
        }
    }

    fn position(&self) -> u64 {
        self.pos
    }
}

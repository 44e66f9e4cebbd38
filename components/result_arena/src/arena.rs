//! Append-only byte arena with a hard capacity.
//!
//! Strings are stored back to back, each followed by a NUL terminator.
//! An absent string occupies no bytes and is addressed by an empty span.

use std::fmt;

use arrayvec::{ArrayVec, CapacityError};

/// Location of one stored string inside an arena.
///
/// `len` is the encoded length: content plus terminator, or 0 when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset of the first content byte
    pub start: usize,
    /// Encoded length including the terminator
    pub len: usize,
}

impl Span {
    /// Offset one past the terminator; the next span starts here.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Fixed-capacity arena of NUL-terminated byte strings.
pub struct ByteArena<const CAP: usize> {
    bytes: ArrayVec<u8, CAP>,
}

impl<const CAP: usize> ByteArena<CAP> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            bytes: ArrayVec::new(),
        }
    }

    /// Total capacity in bytes.
    pub const fn capacity(&self) -> usize {
        CAP
    }

    /// Bytes in use, terminators included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if nothing has been appended since the last clear.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes still available.
    pub fn remaining(&self) -> usize {
        CAP - self.bytes.len()
    }

    /// Discards every stored string.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Size a string occupies once stored.
    pub fn encoded_len(bytes: Option<&[u8]>) -> usize {
        bytes.map_or(0, |b| b.len() + 1)
    }

    /// Returns true if a string of `encoded_len` bytes can be appended.
    pub fn fits(&self, encoded_len: usize) -> bool {
        encoded_len <= self.remaining()
    }

    /// Appends a string and its terminator.
    ///
    /// Nothing is written when the string does not fit.
    pub fn append(&mut self, bytes: Option<&[u8]>) -> Result<Span, CapacityError> {
        let start = self.bytes.len();
        let Some(bytes) = bytes else {
            return Ok(Span { start, len: 0 });
        };

        if !self.fits(bytes.len() + 1) {
            return Err(CapacityError::new(()));
        }
        self.bytes.try_extend_from_slice(bytes)?;
        self.bytes.try_push(0).map_err(|e| e.simplify())?;

        Ok(Span {
            start,
            len: bytes.len() + 1,
        })
    }

    /// Stored bytes for a span, terminator included.
    ///
    /// Spans that do not lie inside the used region yield an empty slice.
    pub fn get(&self, span: Span) -> &[u8] {
        self.bytes.get(span.start..span.end()).unwrap_or(&[])
    }
}

impl<const CAP: usize> Default for ByteArena<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> fmt::Debug for ByteArena<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteArena")
            .field("len", &self.len())
            .field("capacity", &CAP)
            .finish()
    }
}

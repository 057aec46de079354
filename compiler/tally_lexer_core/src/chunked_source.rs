//! Many owned fragments presented as one byte stream.
//!
//! The scanner pulls one byte at a time through [`CharSource`]. A
//! [`ChunkedSource`] walks its fragments with a `(fragment, offset)` cursor
//! and frees each fragment the moment its last byte is handed out, so at
//! most one fragment is live beyond the fragment list itself.
//!
//! # Fragment Boundaries
//!
//! Boundaries are invisible to the reader: `["1", "+", "2"]` reads exactly
//! like `["1+2"]`. Empty fragments contribute nothing and cost no read.

use tracing::trace;

use crate::{GrowableBuffer, LexError};

/// A pull-based byte source for the scanner.
///
/// `None` is the end-of-stream sentinel. Once a source has returned `None`
/// it keeps returning `None`.
pub trait CharSource {
    fn read(&mut self) -> Option<u8>;
}

/// Reading from a byte slice consumes it from the front.
impl CharSource for &[u8] {
    #[inline]
    fn read(&mut self) -> Option<u8> {
        let (&first, rest) = self.split_first()?;
        *self = rest;
        Some(first)
    }
}

/// Ordered, owned input fragments read as one continuous stream.
///
/// # Invariant
///
/// The cursor always points at an unconsumed byte or at the logical end.
/// Every slot before `fragment` is released (`None`); the slot at
/// `fragment`, if any, is live and `offset` is strictly inside it unless
/// the fragment is empty.
#[derive(Debug, Default)]
pub struct ChunkedSource {
    /// Fragment storage; a slot becomes `None` once released.
    fragments: GrowableBuffer<Option<Box<[u8]>>>,
    /// Index of the fragment the cursor is in.
    fragment: usize,
    /// Byte offset of the next read within `fragment`.
    offset: usize,
}

impl ChunkedSource {
    /// Create a source with no fragments.
    pub const fn new() -> Self {
        Self {
            fragments: GrowableBuffer::new(),
            fragment: 0,
            offset: 0,
        }
    }

    /// Append an owned fragment to the end of the stream.
    ///
    /// Fragments carry no terminator: anything from the first NUL byte on is
    /// dropped. Fragments may be added after reading has started, including
    /// after the source reported end-of-stream; reads then resume with the
    /// new fragment.
    pub fn add(&mut self, fragment: impl Into<Vec<u8>>) -> Result<(), LexError> {
        let mut bytes = fragment.into();
        if let Some(nul) = memchr::memchr(0, &bytes) {
            bytes.truncate(nul);
        }
        self.fragments.push(Some(bytes.into_boxed_slice()))?;
        Ok(())
    }

    /// Next byte of the concatenated fragments, or `None` at the end.
    pub fn read(&mut self) -> Option<u8> {
        loop {
            let slot = self.fragments.get_mut(self.fragment)?;

            let (byte, exhausted) = match slot.as_deref() {
                Some(bytes) => match bytes.get(self.offset) {
                    Some(&b) => (Some(b), self.offset + 1 == bytes.len()),
                    None => (None, true),
                },
                None => (None, true),
            };

            if exhausted {
                *slot = None;
                trace!(fragment = self.fragment, "released input fragment");
                self.fragment += 1;
                self.offset = 0;
            } else {
                self.offset += 1;
            }

            if byte.is_some() {
                return byte;
            }
        }
    }

    /// Total fragments ever added, released or not.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Fragments still holding storage.
    pub fn live_fragments(&self) -> usize {
        self.fragments.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns `true` once every added fragment has been read and released.
    pub fn is_exhausted(&self) -> bool {
        self.fragment >= self.fragments.len()
    }
}

impl CharSource for ChunkedSource {
    #[inline]
    fn read(&mut self) -> Option<u8> {
        ChunkedSource::read(self)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

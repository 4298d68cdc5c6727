// Copyright (c) 2025-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::MemoryAccessor;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

const WORD_SIZE: usize = std::mem::size_of::<u64>();

/// Bounds-checked accessor over a byte buffer
///
/// The buffer is the address space: address `0` is its first byte and
/// every access must stay within `[0, len)`.
///
/// Out-of-bounds accesses panic, because the map never issues them on
/// a region it has validated.
#[derive(Clone, Debug)]
pub struct SliceMemory<B>(B);

impl<B: AsRef<[u8]> + AsMut<[u8]>> SliceMemory<B> {
    /// Wraps a buffer.
    #[must_use]
    pub fn new(buffer: B) -> Self {
        Self(buffer)
    }

    /// Returns the size of the address space in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.as_ref().len()
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the raw bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Consumes the accessor, returning the buffer.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.0
    }

    fn range(&self, address: u64, len: usize) -> std::ops::Range<usize> {
        let start = usize::try_from(address).ok();
        let end = start.and_then(|start| start.checked_add(len));

        match (start, end) {
            (Some(start), Some(end)) if end <= self.len() => start..end,
            _ => panic!(
                "access of {len} bytes at {address:#x} is out of bounds (buffer has {} bytes)",
                self.len()
            ),
        }
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> MemoryAccessor for SliceMemory<B> {
    fn read_u64(&self, address: u64) -> u64 {
        let range = self.range(address, WORD_SIZE);

        #[expect(clippy::indexing_slicing, reason = "range was checked above")]
        let mut word = &self.0.as_ref()[range];

        #[expect(clippy::expect_used, reason = "word is exactly 8 bytes long")]
        word.read_u64::<LittleEndian>().expect("cannot fail")
    }

    fn write_u64(&mut self, address: u64, value: u64) {
        let range = self.range(address, WORD_SIZE);

        #[expect(clippy::indexing_slicing, reason = "range was checked above")]
        let mut word = &mut self.0.as_mut()[range];

        #[expect(clippy::expect_used, reason = "word is exactly 8 bytes long")]
        word.write_u64::<LittleEndian>(value).expect("cannot fail");
    }

    fn fill_zero(&mut self, address: u64, len: u64) {
        let len = usize::try_from(len).unwrap_or(usize::MAX);
        let range = self.range(address, len);

        #[expect(clippy::indexing_slicing, reason = "range was checked above")]
        self.0.as_mut()[range].fill(0);
    }
}

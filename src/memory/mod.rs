// Copyright (c) 2025-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

mod raw;
mod slice;

pub use raw::RawMemory;
pub use slice::SliceMemory;

/// Word-level access to the memory region backing a map.
///
/// This is the only interface a map uses to touch its region. All address
/// arithmetic happens inside the map, so an accessor only ever sees addresses
/// inside the region the map was opened on.
///
/// Words are stored little-endian, so a region has the same byte layout
/// no matter which accessor wrote it.
pub trait MemoryAccessor {
    /// Reads the 64-bit word at `address`.
    fn read_u64(&self, address: u64) -> u64;

    /// Writes the 64-bit word `value` at `address`.
    fn write_u64(&mut self, address: u64, value: u64);

    /// Sets `len` bytes starting at `address` to zero.
    fn fill_zero(&mut self, address: u64, len: u64);
}

impl<M: MemoryAccessor + ?Sized> MemoryAccessor for &mut M {
    fn read_u64(&self, address: u64) -> u64 {
        (**self).read_u64(address)
    }

    fn write_u64(&mut self, address: u64, value: u64) {
        (**self).write_u64(address, value);
    }

    fn fill_zero(&mut self, address: u64, len: u64) {
        (**self).fill_zero(address, len);
    }
}

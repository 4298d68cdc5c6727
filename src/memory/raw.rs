// Copyright (c) 2025-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

#![allow(unsafe_code)]

use super::MemoryAccessor;

/// Accessor over real process addresses
///
/// Addresses are dereferenced as-is, without any bounds checks. Use this
/// to place a map in shared memory, a memory-mapped file or any other
/// externally managed arena.
///
/// Reads and writes are unaligned, so the region may start at any address.
#[derive(Debug)]
pub struct RawMemory {
    // Not Send/Sync: the region has no synchronization of its own
    _marker: std::marker::PhantomData<*mut u8>,
}

impl RawMemory {
    /// Creates an accessor over the process address space.
    ///
    /// # Safety
    ///
    /// For as long as any map uses this accessor, every region it is
    /// opened on must be valid for reads and writes, must not be freed
    /// and must not be accessed by anything else while a map operation runs.
    #[must_use]
    pub const unsafe fn new() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }

    fn ptr(address: u64) -> *mut u64 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "addresses come from this process, so they fit into usize"
        )]
        let address = address as usize;

        std::ptr::with_exposed_provenance_mut(address)
    }
}

impl MemoryAccessor for RawMemory {
    fn read_u64(&self, address: u64) -> u64 {
        // SAFETY: The caller of `RawMemory::new` vouched for the region,
        // and the map only touches addresses inside it
        let word = unsafe { Self::ptr(address).read_unaligned() };
        u64::from_le(word)
    }

    fn write_u64(&mut self, address: u64, value: u64) {
        // SAFETY: See `read_u64`
        unsafe {
            Self::ptr(address).write_unaligned(value.to_le());
        }
    }

    fn fill_zero(&mut self, address: u64, len: u64) {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a valid region fits into the address space"
        )]
        let len = len as usize;

        let ptr = Self::ptr(address).cast::<u8>();

        // SAFETY: See `read_u64`
        unsafe {
            std::ptr::write_bytes(ptr, 0, len);
        }
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn raw_memory_roundtrip() {
        let mut region = vec![u64::MAX; 4];
        let base = region.as_mut_ptr().expose_provenance() as u64;

        // SAFETY: `region` outlives the accessor and is not touched meanwhile
        let mut memory = unsafe { RawMemory::new() };

        memory.fill_zero(base, 16);
        memory.write_u64(base + 24, 42);

        assert_eq!(0, memory.read_u64(base));
        assert_eq!(0, memory.read_u64(base + 8));
        assert_eq!(u64::MAX, memory.read_u64(base + 16));
        assert_eq!(42, memory.read_u64(base + 24));

        assert_eq!(vec![0, 0, u64::MAX, 42u64.to_le()], region);
    }

    #[test]
    fn raw_memory_unaligned() {
        let mut region = vec![0u8; 32];
        let base = region.as_mut_ptr().expose_provenance() as u64 + 3;

        // SAFETY: `region` outlives the accessor and is not touched meanwhile
        let mut memory = unsafe { RawMemory::new() };

        memory.write_u64(base, 0x0102_0304_0506_0708);
        assert_eq!(0x0102_0304_0506_0708, memory.read_u64(base));

        assert_eq!(&[8, 7, 6, 5, 4, 3, 2, 1], &region[3..11]);
    }
}

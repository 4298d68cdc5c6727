// Copyright (c) 2025-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{
    memory::MemoryAccessor,
    slot::{capacity_for, SLOT_SIZE},
    Error, LongLongMap,
};

/// Map configuration
///
/// Describes the memory region a map lives in. The region is allocated,
/// owned and eventually freed by the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Address of the first byte of the region
    #[doc(hidden)]
    pub base_address: u64,

    /// Size of the region in bytes
    #[doc(hidden)]
    pub size: u64,
}

impl Config {
    /// Describes the region `[base_address, base_address + size)`.
    #[must_use]
    pub fn new(base_address: u64, size: u64) -> Self {
        Self { base_address, size }
    }

    /// Returns the number of slots the region holds.
    ///
    /// Bytes past the last full slot are never used for entries.
    #[must_use]
    pub fn capacity(&self) -> u64 {
        capacity_for(self.size)
    }

    /// Checks that the region can back a map.
    ///
    /// # Errors
    ///
    /// Returns error if the region cannot hold a single slot, or if it
    /// wraps around the address space.
    pub fn validate(&self) -> crate::Result<()> {
        if self.size < SLOT_SIZE {
            return Err(Error::RegionTooSmall { size: self.size });
        }

        if self.base_address.checked_add(self.size).is_none() {
            return Err(Error::AddressOverflow {
                base_address: self.base_address,
                size: self.size,
            });
        }

        Ok(())
    }

    /// Opens a map on the region, zeroing all of it.
    ///
    /// Any data previously stored in the region is lost.
    ///
    /// # Errors
    ///
    /// Returns error if the region is invalid, see [`Config::validate`].
    pub fn open<M: MemoryAccessor>(self, memory: M) -> crate::Result<LongLongMap<M>> {
        self.validate()?;
        Ok(LongLongMap::create(self, memory))
    }
}

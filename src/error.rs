// Copyright (c) 2025-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Represents errors that can occur when opening or writing to a map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The region cannot hold a single slot
    RegionTooSmall {
        /// Size of the rejected region in bytes
        size: u64,
    },

    /// The region `[base_address, base_address + size)` wraps around the address space
    AddressOverflow {
        /// Start of the rejected region
        base_address: u64,

        /// Size of the rejected region in bytes
        size: u64,
    },

    /// Every slot on the probe sequence is taken by another key
    OutOfCapacity {
        /// Number of slots in the region
        capacity: u64,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RegionTooSmall { size } => {
                write!(
                    f,
                    "region of {size} bytes is too small, need at least {} bytes",
                    crate::slot::SLOT_SIZE
                )
            }
            Self::AddressOverflow { base_address, size } => {
                write!(
                    f,
                    "region of {size} bytes at {base_address:#x} overflows the address space"
                )
            }
            Self::OutOfCapacity { capacity } => {
                write!(f, "out of capacity: all {capacity} slots are taken")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Map result
pub type Result<T> = std::result::Result<T, Error>;

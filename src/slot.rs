// Copyright (c) 2025-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Slot layout
//!
//! The region is an array of fixed-size slots:
//!
//! ```text
//! base + i * 16
//! +----------------+----------------+
//! | key (8 bytes)  | value (8 bytes)|
//! +----------------+----------------+
//! ```
//!
//! A stored key of `0` marks the slot as empty.

/// Size of a single key-value slot in bytes.
pub const SLOT_SIZE: u64 = (std::mem::size_of::<u64>() * 2) as u64;

const KEY_OFFSET: u64 = 0;
const VALUE_OFFSET: u64 = std::mem::size_of::<u64>() as u64;

/// Stored key of a slot that was never written.
pub const EMPTY_KEY: i64 = 0;

/// Returns the number of slots that fit into a region of `size` bytes.
#[must_use]
pub const fn capacity_for(size: u64) -> u64 {
    size / SLOT_SIZE
}

/// Address of a slot inside the region.
///
/// The caller guarantees `index < capacity`, so the result stays inside
/// the region that was validated when the map was opened.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlotAddress(u64);

impl SlotAddress {
    /// Address of slot `index` in the region starting at `base_address`.
    #[must_use]
    pub fn new(base_address: u64, index: u64) -> Self {
        debug_assert!(
            index.checked_mul(SLOT_SIZE).is_some(),
            "slot offset overflows"
        );
        Self(base_address + index * SLOT_SIZE)
    }

    /// Address of the key field.
    #[must_use]
    pub fn key(self) -> u64 {
        self.0 + KEY_OFFSET
    }

    /// Address of the value field.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0 + VALUE_OFFSET
    }
}

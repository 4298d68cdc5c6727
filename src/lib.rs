// Copyright (c) 2025-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! A fixed-capacity `i64` to `i64` hash map that lives in a memory region
//! supplied by the caller.
//!
//! ##### About
//!
//! The map performs no allocation of its own. It is opened on an address and
//! a byte size, zeroes that region, and from then on stores every entry
//! directly in it: a plain array of 16-byte slots (key, then value), with
//! collisions resolved by linear probing.
//!
//! This makes it usable where the memory has to come from somewhere
//! specific, like shared memory, a memory-mapped file or a pooled allocator.
//! Allocating, freeing and synchronizing access to that region is up to the
//! caller.
//!
//! Memory is accessed through a [`MemoryAccessor`]: [`RawMemory`] dereferences
//! real addresses, [`SliceMemory`] is a bounds-checked accessor over a byte
//! buffer.
//!
//! ##### Limitations
//!
//! - Capacity is `size / 16` slots and never grows. Inserting a new key into
//!   a full map fails with [`Error::OutOfCapacity`].
//! - Entries cannot be removed.
//! - A stored key of `0` marks an empty slot. Absent keys read as `0`, and
//!   key `0` itself is only stored in a slot that still looks empty,
//!   see [`LongLongMap`].
//! - The map is not thread-safe.
//!
//! # Example usage
//!
//! ```
//! use llmap::{Config, SliceMemory};
//!
//! let mut map = Config::new(0, 1_024).open(SliceMemory::new(vec![0u8; 1_024]))?;
//! assert_eq!(64, map.capacity());
//!
//! assert_eq!(0, map.put(5, 10)?);
//! assert_eq!(10, map.put(5, 20)?);
//! assert_eq!(20, map.get(5));
//! assert_eq!(0, map.get(6));
//! #
//! # Ok::<(), llmap::Error>(())
//! ```

#![deny(clippy::all, missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::indexing_slicing)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![warn(clippy::redundant_feature_names)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

/// Configuration
pub mod config;

mod error;
mod map;

/// Memory accessors
pub mod memory;

#[cfg(feature = "metrics")]
mod metrics;

mod probe;

#[doc(hidden)]
pub mod slot;

pub use {
    config::Config,
    error::{Error, Result},
    map::LongLongMap,
    memory::{MemoryAccessor, RawMemory, SliceMemory},
    probe::ProbeSequence,
    slot::SLOT_SIZE,
};

#[cfg(feature = "metrics")]
pub use metrics::Metrics;

// Copyright (c) 2025-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{
    config::Config,
    memory::MemoryAccessor,
    probe::ProbeSequence,
    slot::{SlotAddress, EMPTY_KEY},
    Error,
};

#[cfg(feature = "metrics")]
use {crate::metrics::Metrics, std::sync::atomic::Ordering::Relaxed};

#[expect(
    clippy::cast_possible_wrap,
    reason = "words are reinterpreted, not converted"
)]
fn word_to_i64(word: u64) -> i64 {
    word as i64
}

#[expect(
    clippy::cast_sign_loss,
    reason = "words are reinterpreted, not converted"
)]
fn i64_to_word(value: i64) -> u64 {
    value as u64
}

/// Fixed-capacity `i64` to `i64` hash map stored in a caller-supplied region
///
/// The map owns no memory. It treats its region as an array of 16-byte
/// slots (key, then value) and resolves collisions with linear probing.
///
/// A stored key of `0` marks an empty slot, so:
///
/// - absent keys read as `0`, same as keys stored with value `0`
/// - key `0` lives in the first empty slot of its probe sequence, which a
///   later insert of another key can claim; key `0` then loses its value
///
/// Capacity is fixed when the map is opened. Entries are never removed.
#[derive(Debug)]
pub struct LongLongMap<M> {
    memory: M,
    config: Config,
    capacity: u64,

    #[cfg(feature = "metrics")]
    metrics: Metrics,
}

impl<M: MemoryAccessor> LongLongMap<M> {
    /// Opens a map on the region `[base_address, base_address + size)`,
    /// zeroing all of it.
    ///
    /// Shorthand for `Config::new(base_address, size).open(memory)`.
    ///
    /// # Errors
    ///
    /// Returns error if the region cannot hold a single slot, or if it
    /// wraps around the address space.
    pub fn new(memory: M, base_address: u64, size: u64) -> crate::Result<Self> {
        Config::new(base_address, size).open(memory)
    }

    /// Zeroes the (already validated) region.
    pub(crate) fn create(config: Config, mut memory: M) -> Self {
        log::trace!(
            "Zeroing {} bytes at {:#x}",
            config.size,
            config.base_address
        );
        memory.fill_zero(config.base_address, config.size);

        let capacity = config.capacity();

        log::debug!(
            "Opened map with {capacity} slots ({} bytes at {:#x})",
            config.size,
            config.base_address,
        );

        Self {
            memory,
            config,
            capacity,

            #[cfg(feature = "metrics")]
            metrics: Metrics::default(),
        }
    }

    /// Returns the maximum number of keys the map can hold.
    #[must_use]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Returns the address of the first slot.
    #[must_use]
    pub fn base_address(&self) -> u64 {
        self.config.base_address
    }

    /// Returns the size of the region in bytes.
    #[must_use]
    pub fn region_size(&self) -> u64 {
        self.config.size
    }

    /// Returns the memory accessor.
    #[must_use]
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns the runtime counters.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Consumes the map, returning the memory accessor.
    ///
    /// The region keeps its contents.
    #[must_use]
    pub fn into_inner(self) -> M {
        self.memory
    }

    fn slot(&self, idx: u64) -> SlotAddress {
        SlotAddress::new(self.config.base_address, idx)
    }

    fn read_key(&self, slot: SlotAddress) -> i64 {
        word_to_i64(self.memory.read_u64(slot.key()))
    }

    fn read_value(&self, slot: SlotAddress) -> i64 {
        word_to_i64(self.memory.read_u64(slot.value()))
    }

    #[cfg(feature = "metrics")]
    fn record_probe(&self, steps: usize) {
        self.metrics.probe_steps.fetch_add(steps, Relaxed);
    }

    #[cfg(feature = "metrics")]
    fn record_write(&self, claimed_empty: bool) {
        if claimed_empty {
            self.metrics.inserts.fetch_add(1, Relaxed);
        } else {
            self.metrics.updates.fetch_add(1, Relaxed);
        }
    }

    #[cfg(not(feature = "metrics"))]
    #[expect(clippy::unused_self, reason = "counterpart of the metrics version")]
    fn record_probe(&self, _steps: usize) {}

    #[cfg(not(feature = "metrics"))]
    #[expect(clippy::unused_self, reason = "counterpart of the metrics version")]
    fn record_write(&self, _claimed_empty: bool) {}

    /// Returns the value stored for `key`, or 0 if the key is absent.
    ///
    /// Runs in O(1) without collisions, O(capacity) in the worst case.
    #[must_use]
    pub fn get(&self, key: i64) -> i64 {
        #[cfg(feature = "metrics")]
        self.metrics.lookups.fetch_add(1, Relaxed);

        for (step, idx) in ProbeSequence::new(key, self.capacity).enumerate() {
            let slot = self.slot(idx);
            let stored_key = self.read_key(slot);

            // NOTE: Equality has to be checked before emptiness,
            // otherwise key 0 could never be found
            if stored_key == key {
                self.record_probe(step + 1);

                return self.read_value(slot);
            }

            // Without deletions, a key is always stored before the first
            // empty slot of its probe sequence
            if stored_key == EMPTY_KEY {
                self.record_probe(step + 1);

                return 0;
            }
        }

        self.record_probe(usize::try_from(self.capacity).unwrap_or(usize::MAX));

        0
    }

    /// Stores `value` for `key`, returning the previous value, or 0 if the
    /// key was newly inserted.
    ///
    /// Runs in O(1) without collisions, O(capacity) in the worst case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfCapacity`] if `key` is not stored yet and no
    /// empty slot is left on its probe sequence. The map is unchanged in
    /// that case.
    pub fn put(&mut self, key: i64, value: i64) -> crate::Result<i64> {
        for (step, idx) in ProbeSequence::new(key, self.capacity).enumerate() {
            let slot = self.slot(idx);
            let stored_key = self.read_key(slot);

            // NOTE: Same check order as in `get`
            if stored_key == key {
                let prev = self.read_value(slot);
                self.memory.write_u64(slot.value(), i64_to_word(value));

                // Key 0 matches a slot that is still empty
                self.record_write(stored_key == EMPTY_KEY);
                self.record_probe(step + 1);

                return Ok(prev);
            }

            if stored_key == EMPTY_KEY {
                self.memory.write_u64(slot.key(), i64_to_word(key));
                self.memory.write_u64(slot.value(), i64_to_word(value));

                self.record_write(true);
                self.record_probe(step + 1);

                return Ok(0);
            }
        }

        #[cfg(feature = "metrics")]
        self.metrics.capacity_failures.fetch_add(1, Relaxed);
        self.record_probe(usize::try_from(self.capacity).unwrap_or(usize::MAX));

        log::warn!(
            "Cannot insert key {key}: all {} slots are taken",
            self.capacity
        );

        Err(Error::OutOfCapacity {
            capacity: self.capacity,
        })
    }

    /// Counts slots holding a non-zero key.
    ///
    /// An entry for key 0 is indistinguishable from an empty slot
    /// and is not counted.
    ///
    /// Scans the whole region, so this is O(capacity).
    #[must_use]
    pub fn occupied_slots(&self) -> u64 {
        (0..self.capacity)
            .filter(|&idx| self.read_key(self.slot(idx)) != EMPTY_KEY)
            .count() as u64
    }

    /// Ratio of occupied slots to capacity (0.0 - 1.0).
    ///
    /// Scans the whole region, see [`LongLongMap::occupied_slots`].
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "only used for reporting")]
    pub fn load_factor(&self) -> f64 {
        self.occupied_slots() as f64 / self.capacity as f64
    }
}

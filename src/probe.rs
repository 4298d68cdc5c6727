// Copyright (c) 2025-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Linear probe sequence of a key
///
/// Yields slot indexes `(start + i) % capacity` for `i` in `0..capacity`,
/// where `start = key % capacity` with the key read as an unsigned bit pattern,
/// so negative keys land inside `[0, capacity)` as well.
///
/// The sequence visits every slot exactly once and then ends.
#[derive(Clone, Debug)]
pub struct ProbeSequence {
    start: u64,
    step: u64,
    capacity: u64,
}

impl ProbeSequence {
    /// Creates the probe sequence of `key` in a table of `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    #[must_use]
    pub fn new(key: i64, capacity: u64) -> Self {
        assert!(capacity > 0, "probe sequence needs at least one slot");

        #[expect(
            clippy::cast_sign_loss,
            reason = "keys are hashed by their bit pattern"
        )]
        let start = (key as u64) % capacity;

        Self {
            start,
            step: 0,
            capacity,
        }
    }

    /// Returns the slot index the sequence starts at.
    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }
}

impl Iterator for ProbeSequence {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step == self.capacity {
            return None;
        }

        // (start + step) % capacity, without overflowing for huge capacities
        let until_wrap = self.capacity - self.start;
        let idx = if self.step < until_wrap {
            self.start + self.step
        } else {
            self.step - until_wrap
        };
        self.step += 1;

        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        usize::try_from(self.capacity - self.step)
            .map_or((usize::MAX, None), |remaining| (remaining, Some(remaining)))
    }
}

impl std::iter::FusedIterator for ProbeSequence {}

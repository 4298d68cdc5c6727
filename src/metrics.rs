// Copyright (c) 2025-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering::Relaxed;

/// Runtime counters of a map
#[derive(Debug, Default)]
pub struct Metrics {
    /// Number of `get` calls
    pub(crate) lookups: AtomicUsize,

    /// Number of `put` calls that claimed an empty slot
    ///
    /// Includes writes of key 0, whose slot stays empty
    pub(crate) inserts: AtomicUsize,

    /// Number of `put` calls that overwrote the value of an existing key
    pub(crate) updates: AtomicUsize,

    /// Number of `put` calls that failed because all slots were taken
    pub(crate) capacity_failures: AtomicUsize,

    /// Number of slots inspected across all operations
    pub(crate) probe_steps: AtomicUsize,
}

#[allow(clippy::cast_precision_loss)]
impl Metrics {
    /// Number of lookups.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Relaxed)
    }

    /// Number of writes that stored a new key.
    pub fn inserts(&self) -> usize {
        self.inserts.load(Relaxed)
    }

    /// Number of writes that replaced the value of an existing key.
    pub fn updates(&self) -> usize {
        self.updates.load(Relaxed)
    }

    /// Number of writes rejected for lack of capacity.
    pub fn capacity_failures(&self) -> usize {
        self.capacity_failures.load(Relaxed)
    }

    /// Number of slots inspected.
    pub fn probe_steps(&self) -> usize {
        self.probe_steps.load(Relaxed)
    }

    /// Average number of slots inspected per operation.
    ///
    /// 1.0 means no operation ever hit a collision.
    pub fn average_probe_length(&self) -> f64 {
        let ops = self.lookups() + self.inserts() + self.updates() + self.capacity_failures();
        if ops == 0 {
            return 0.0;
        }
        self.probe_steps() as f64 / ops as f64
    }
}

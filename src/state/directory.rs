//! Handle directory.
//!
//! Maps claimed handles to the outbound queue of the connection holding
//! them. The directory is the single source of truth for who is online and
//! for how many slots are taken.

use crate::state::{ConnectionId, Outbound};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Outcome of a handle claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    Granted,
    InUse,
    Full,
}

/// Concurrent handle registry with a hard capacity.
///
/// Claims are decided under the DashMap shard lock for the handle, so two
/// racing claims for one handle see each other. The slot counter is
/// reserved inside that lock, so racing claims for different handles can
/// never push the count past `capacity`.
pub struct Directory {
    entries: DashMap<String, Outbound>,
    admitted: AtomicUsize,
    capacity: usize,
}

impl Directory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            admitted: AtomicUsize::new(0),
            capacity,
        }
    }

    /// Maximum number of concurrently claimed handles.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of claimed handles.
    pub fn len(&self) -> usize {
        self.admitted.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Try to bind `handle` to `outbound`.
    ///
    /// An existing holder wins over a full server: `InUse` is reported even
    /// when no slots are free.
    pub fn claim(&self, handle: &str, outbound: &Outbound) -> Claim {
        match self.entries.entry(handle.to_owned()) {
            Entry::Occupied(_) => Claim::InUse,
            Entry::Vacant(slot) => {
                let reserved = self
                    .admitted
                    .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                        (n < self.capacity).then_some(n + 1)
                    });
                if reserved.is_err() {
                    return Claim::Full;
                }
                slot.insert(outbound.clone());
                Claim::Granted
            }
        }
    }

    /// Outbound queue for `handle`, if someone holds it.
    pub fn lookup(&self, handle: &str) -> Option<Outbound> {
        self.entries.get(handle).map(|entry| entry.value().clone())
    }

    /// Snapshot of claimed handles, sorted.
    pub fn handles(&self) -> Vec<String> {
        let mut handles: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        handles.sort_unstable();
        handles
    }

    /// Drop `handle` if it is still held by connection `id`.
    ///
    /// Returns true if an entry was removed.
    pub fn release(&self, handle: &str, id: ConnectionId) -> bool {
        // The slot is freed under the shard lock, before the entry goes, so
        // a claim never sees a vacant handle with its slot still counted.
        self.entries
            .remove_if(handle, |_, outbound| {
                let held = outbound.id() == id;
                if held {
                    self.admitted.fetch_sub(1, Ordering::AcqRel);
                }
                held
            })
            .is_some()
    }
}

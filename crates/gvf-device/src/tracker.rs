//! Allocation tracking for device-owned storage.
//!
//! Every buffer a device hands out is wrapped in a [`Leased`] value whose
//! [`Lease`] decrements the device's live count on drop, on every exit
//! path, including unwinding out of a failed call.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared counters for live and historical allocations.
#[derive(Debug, Default)]
pub struct AllocationTracker {
    live: AtomicUsize,
    total: AtomicUsize,
    live_bytes: AtomicUsize,
    peak_bytes: AtomicUsize,
}

impl AllocationTracker {
    /// Create an empty tracker.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Record an allocation of `bytes` and return its lease.
    pub fn acquire(tracker: &Arc<Self>, bytes: usize) -> Lease {
        tracker.live.fetch_add(1, Ordering::AcqRel);
        tracker.total.fetch_add(1, Ordering::AcqRel);
        let now = tracker.live_bytes.fetch_add(bytes, Ordering::AcqRel) + bytes;
        tracker.peak_bytes.fetch_max(now, Ordering::AcqRel);
        Lease {
            tracker: Arc::clone(tracker),
            bytes,
        }
    }

    /// Allocations not yet released.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }

    /// Allocations ever made.
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Acquire)
    }

    /// Bytes held by live allocations.
    pub fn live_bytes(&self) -> usize {
        self.live_bytes.load(Ordering::Acquire)
    }

    /// Highest value `live_bytes` has reached.
    pub fn peak_bytes(&self) -> usize {
        self.peak_bytes.load(Ordering::Acquire)
    }
}

/// Proof of one live allocation. Releases it on drop.
#[derive(Debug)]
pub struct Lease {
    tracker: Arc<AllocationTracker>,
    bytes: usize,
}

impl Lease {
    /// Size of the leased allocation.
    pub fn bytes(&self) -> usize {
        self.bytes
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.tracker.live.fetch_sub(1, Ordering::AcqRel);
        self.tracker.live_bytes.fetch_sub(self.bytes, Ordering::AcqRel);
    }
}

/// A device buffer paired with the lease that accounts for it.
#[derive(Debug)]
pub struct Leased<T> {
    inner: T,
    lease: Lease,
}

impl<T> Leased<T> {
    /// Pair a buffer with its lease.
    pub fn new(inner: T, lease: Lease) -> Self {
        Self { inner, lease }
    }

    /// Size accounted for this buffer.
    pub fn bytes(&self) -> usize {
        self.lease.bytes()
    }
}

impl<T> Deref for Leased<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> DerefMut for Leased<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

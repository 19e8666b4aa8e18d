//! Explicit node-id allocation.
//!
//! Ids come from an allocator object owned by the arena, not from an
//! implicit process-wide counter. The counter is atomic so allocation stays
//! correct if a future driver checks independent functions in parallel.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::NodeId;

/// Monotonic allocator for [`NodeId`]s.
///
/// Ids are unique for the lifetime of the allocator. [`reset`](Self::reset)
/// starts a new epoch: the caller must guarantee that no node from the prior
/// epoch is still reachable, otherwise id collisions are reintroduced. In
/// practice, "reset" means constructing a fresh arena between compilation
/// units.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: AtomicU32,
}

impl IdAllocator {
    /// Create an allocator starting at id 0.
    pub fn new() -> Self {
        Self {
            next: AtomicU32::new(0),
        }
    }

    /// Allocate the next unique id.
    #[inline]
    pub fn fresh(&self) -> NodeId {
        NodeId::new(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Number of ids handed out so far.
    #[inline]
    pub fn count(&self) -> u32 {
        self.next.load(Ordering::Relaxed)
    }

    /// Zero the counter, starting a new epoch.
    ///
    /// Caller contract: no node allocated in the prior epoch may still be
    /// reachable.
    pub fn reset(&self) {
        self.next.store(0, Ordering::Relaxed);
    }
}

//! Shared words: the only way a role touches memory the other role can see.

use std::sync::atomic::{AtomicU64, Ordering, fence};

/// A single 64 bit word shared between the coordinator and the worker.
///
/// There is no hardware coherence between the two sides, so every access is
/// wrapped: reads invalidate before loading and writes flush after storing.
/// Code outside this module never sees the underlying atomic.
#[derive(Debug, Default)]
pub struct SharedWord {
    cell: AtomicU64,
}

impl SharedWord {
    /// Creates a new `SharedWord`.
    ///
    /// # Arguments
    /// * `value` - The initial value of the word.
    ///
    /// # Returns
    /// A new `SharedWord` instance.
    pub const fn new(value: u64) -> Self {
        Self {
            cell: AtomicU64::new(value),
        }
    }

    /// Reads the latest value published by either side.
    ///
    /// Anything the peer wrote before publishing this value is visible to the
    /// caller once this returns.
    ///
    /// # Returns
    /// The current value of the word.
    #[inline]
    pub fn observe(&self) -> u64 {
        fence(Ordering::SeqCst);
        self.cell.load(Ordering::Acquire)
    }

    /// Writes `value` and makes it visible to the peer.
    ///
    /// Every write the caller made before this call becomes visible no later
    /// than `value` itself.
    ///
    /// # Arguments
    /// * `value` - The new value of the word.
    #[inline]
    pub fn publish(&self, value: u64) {
        self.cell.store(value, Ordering::Release);
        fence(Ordering::SeqCst);
    }
}

//! A small arena of batch slots with explicit ownership transfer.

use std::{cell::UnsafeCell, fmt, ops::Deref};

use crate::SharedWord;

const COORDINATOR: u64 = 0;
const WORKER: u64 = 1;

struct Slot<T> {
    owner: SharedWord,
    data: UnsafeCell<T>,
}

/// The batch buffers the coordinator cycles through.
///
/// A slot is either owned by the coordinator, which may write it, or lent to
/// the worker, which may only read it. Lending happens when the coordinator
/// submits a command referencing the slot and the slot comes back when the
/// worker drops its `SlotLease`.
pub struct BatchRing<T> {
    slots: Box<[Slot<T>]>,
}

// SAFETY: The contents of a slot are only reached through `get_mut`, which
//         requires the slot to be owned by the coordinator, or through a
//         `SlotLease`, which only exists while the slot is lent to the worker.
//         The owner word is a `SharedWord`, so both sides agree on who owns it.
unsafe impl<T: Send> Sync for BatchRing<T> {}

impl<T> BatchRing<T> {
    /// Creates a new `BatchRing`.
    ///
    /// # Arguments
    /// * `nslots` - The amount of slots, two gives classic double buffering.
    /// * `init` - Builds the initial contents of every slot.
    ///
    /// # Returns
    /// A new `BatchRing` instance with every slot owned by the coordinator.
    ///
    /// # Panics
    /// If `nslots` is zero.
    pub fn new<F>(nslots: usize, mut init: F) -> Self
    where
        F: FnMut() -> T,
    {
        assert!(nslots > 0, "a batch ring needs at least one slot");

        let slots = (0..nslots)
            .map(|_| Slot {
                owner: SharedWord::new(COORDINATOR),
                data: UnsafeCell::new(init()),
            })
            .collect();

        Self { slots }
    }

    /// The amount of slots in the ring.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether the slot at `idx` is currently lent to the worker.
    pub fn is_lent(&self, idx: usize) -> bool {
        self.slots[idx].owner.observe() == WORKER
    }

    /// Gives the coordinator write access to a slot it owns.
    ///
    /// # Safety
    /// Only the coordinator end may call this, and never while another
    /// reference returned by this method for the same slot is alive.
    ///
    /// # Panics
    /// If the slot is lent to the worker.
    #[allow(clippy::mut_from_ref)]
    pub(crate) unsafe fn get_mut(&self, idx: usize) -> &mut T {
        let slot = &self.slots[idx];
        assert!(
            slot.owner.observe() == COORDINATOR,
            "slot {idx} is lent to the worker"
        );

        // SAFETY: The coordinator owns the slot so the worker holds no lease
        //         over it, the caller guarantees exclusivity on its side.
        unsafe { &mut *slot.data.get() }
    }

    /// Transfers a slot from the coordinator to the worker.
    ///
    /// # Panics
    /// If the slot is already lent.
    pub(crate) fn lend(&self, idx: usize) {
        let slot = &self.slots[idx];
        assert!(
            slot.owner.observe() == COORDINATOR,
            "slot {idx} is already lent to the worker"
        );
        slot.owner.publish(WORKER);
    }

    /// Gives the worker read access to a slot lent to it.
    ///
    /// # Panics
    /// If `idx` is out of range or the slot was not lent.
    pub(crate) fn lease(&self, idx: usize) -> SlotLease<'_, T> {
        let slot = &self.slots[idx];
        assert!(
            slot.owner.observe() == WORKER,
            "slot {idx} was not lent to the worker"
        );

        SlotLease { slot, idx }
    }
}

impl<T> fmt::Debug for BatchRing<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let owners: Vec<_> = (0..self.len())
            .map(|idx| if self.is_lent(idx) { "worker" } else { "coordinator" })
            .collect();

        f.debug_struct("BatchRing").field("owners", &owners).finish()
    }
}

/// Read access to a lent slot, returning it to the coordinator on drop.
pub struct SlotLease<'a, T> {
    slot: &'a Slot<T>,
    idx: usize,
}

impl<T> SlotLease<'_, T> {
    /// The index of the leased slot.
    pub fn index(&self) -> usize {
        self.idx
    }
}

impl<T> Deref for SlotLease<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: The slot stays lent to the worker for as long as this lease
        //         lives, so the coordinator never writes it meanwhile.
        unsafe { &*self.slot.data.get() }
    }
}

impl<T> Drop for SlotLease<'_, T> {
    fn drop(&mut self) {
        self.slot.owner.publish(COORDINATOR);
    }
}

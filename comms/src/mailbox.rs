use std::{cell::UnsafeCell, sync::Arc};

use crate::{BatchRing, Report, SharedWord};

/// The memory both roles share.
///
/// Each direction has one flag word and the payload it announces:
/// * `cmd` announces `slot` (and the ring slot it references),
/// * `req` announces `report` or, during startup, `shared`.
///
/// Only the worker clears `cmd` and only the coordinator clears `req`. A side
/// never writes a payload while the flag announcing it is still set.
pub(crate) struct Mailbox<T, S> {
    pub(crate) cmd: SharedWord,
    pub(crate) slot: SharedWord,
    pub(crate) req: SharedWord,
    pub(crate) progress: SharedWord,
    pub(crate) ring: BatchRing<T>,
    pub(crate) report: UnsafeCell<Report>,
    pub(crate) shared: UnsafeCell<Option<Arc<S>>>,
}

// SAFETY: `report` and `shared` are written by the worker only while `req`
//         reads zero and read by the coordinator only while it does not, the
//         ring guards its own slots. Every other field is a `SharedWord`.
unsafe impl<T: Send, S: Send + Sync> Sync for Mailbox<T, S> {}

impl<T, S> Mailbox<T, S> {
    pub(crate) fn new(ring: BatchRing<T>) -> Self {
        Self {
            cmd: SharedWord::new(0),
            slot: SharedWord::new(0),
            req: SharedWord::new(0),
            progress: SharedWord::new(0),
            ring,
            report: UnsafeCell::new(Report::new()),
            shared: UnsafeCell::new(None),
        }
    }
}

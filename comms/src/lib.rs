//! Shared-memory mailbox between a coordinator and a single worker.
//!
//! Both roles talk over a handful of 64 bit words plus a ring of batch slots.
//! Every exchange is double acknowledged: a side sets a word and only its peer
//! clears it, so there is never more than one command and one request in
//! flight.

mod coordinator_end;
mod error;
mod mailbox;
pub mod msg;
mod poll;
mod report;
mod ring;
mod shared;
mod worker_end;

use std::sync::Arc;

pub use coordinator_end::CoordinatorEnd;
pub use error::{CommsErr, Result};
pub use msg::{Command, Request};
pub use poll::Poller;
pub use report::{MSG_CAPACITY, MsgBuf, Report};
pub use ring::{BatchRing, SlotLease};
pub use shared::SharedWord;
pub use worker_end::{Delivery, WorkerEnd};

use mailbox::Mailbox;

/// Creates both ends of a mailbox.
///
/// # Arguments
/// * `ring` - The batch slots both roles will exchange.
/// * `poller` - How both ends wait on their peer, clones share its cancellation.
///
/// # Returns
/// The coordinator end and the worker end, in that order.
pub fn mailbox<T, S>(ring: BatchRing<T>, poller: Poller) -> (CoordinatorEnd<T, S>, WorkerEnd<T, S>)
where
    T: Send,
    S: Send + Sync,
{
    let mailbox = Arc::new(Mailbox::new(ring));

    (
        CoordinatorEnd::new(Arc::clone(&mailbox), poller.clone()),
        WorkerEnd::new(mailbox, poller),
    )
}

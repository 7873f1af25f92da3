//! The worker's handle over the mailbox.

use std::sync::Arc;

use log::debug;

use crate::{
    Poller, Result,
    mailbox::Mailbox,
    msg::{Command, Request},
    report::Report,
    ring::SlotLease,
};

/// The worker side of the mailbox: takes commands and publishes reports.
pub struct WorkerEnd<T, S> {
    mailbox: Arc<Mailbox<T, S>>,
    poller: Poller,
}

/// A command taken by the worker together with the batch it references.
///
/// The batch slot returns to the coordinator when the delivery is dropped.
pub struct Delivery<'a, T> {
    command: Command,
    lease: SlotLease<'a, T>,
}

impl<T> Delivery<'_, T> {
    pub fn command(&self) -> Command {
        self.command
    }

    pub fn batch(&self) -> &T {
        &self.lease
    }

    pub fn slot(&self) -> usize {
        self.lease.index()
    }
}

impl<T, S> WorkerEnd<T, S> {
    pub(crate) fn new(mailbox: Arc<Mailbox<T, S>>, poller: Poller) -> Self {
        Self { mailbox, poller }
    }

    /// Shares `shared` with the coordinator and signals the end of startup.
    ///
    /// # Arguments
    /// * `shared` - The resource the coordinator needs to prepare batches.
    ///
    /// # Returns
    /// An error if cancelled while the coordinator holds a previous request.
    pub fn announce_ready(&mut self, shared: Arc<S>) -> Result<()> {
        let mailbox = &self.mailbox;
        self.poller.wait_until(&mailbox.req, 0)?;

        // SAFETY: `req` is clear, so the coordinator is not reading `shared`.
        unsafe { *mailbox.shared.get() = Some(shared) };
        mailbox.req.publish(Request::Ready.encode());

        Ok(())
    }

    /// Waits for the next command and acknowledges it.
    ///
    /// The slot reference is read before the command word is cleared, after
    /// that the coordinator is free to prepare the next slot.
    ///
    /// # Returns
    /// The command and the batch it refers to, or an error if cancelled.
    ///
    /// # Panics
    /// If the command references a slot that was not lent to the worker.
    pub fn wait_command(&mut self) -> Result<Delivery<'_, T>> {
        let mailbox = &self.mailbox;
        let word = self.poller.wait_while(&mailbox.cmd, 0)?;
        let idx = mailbox.slot.observe() as usize;

        let command = Command::decode(word);
        let lease = mailbox.ring.lease(idx);
        mailbox.cmd.publish(Command::Idle.encode());

        debug!(slot = idx; "received {command}");
        Ok(Delivery { command, lease })
    }

    /// Publishes a report once the coordinator took the previous one.
    ///
    /// # Arguments
    /// * `write` - Fills the cleared report.
    ///
    /// # Returns
    /// An error if cancelled while waiting for the acknowledgement.
    pub fn publish<F>(&mut self, write: F) -> Result<()>
    where
        F: FnOnce(&mut Report),
    {
        let mailbox = &self.mailbox;
        self.poller.wait_until(&mailbox.req, 0)?;

        // SAFETY: `req` is clear, so the coordinator is not copying the
        //         report and will not until we set it below.
        let report = unsafe { &mut *mailbox.report.get() };
        report.clear();
        write(report);

        mailbox.req.publish(Request::Report.encode());
        Ok(())
    }

    /// How many reports the coordinator says it has consumed.
    pub fn progress(&self) -> u64 {
        self.mailbox.progress.observe()
    }

    pub fn poller(&self) -> &Poller {
        &self.poller
    }
}

//! The coordinator's handle over the mailbox.

use std::sync::Arc;

use log::debug;

use crate::{
    CommsErr, Poller, Result,
    mailbox::Mailbox,
    msg::{Command, Request},
    report::Report,
};

/// The coordinator side of the mailbox: fills batch slots, submits commands
/// and collects reports.
pub struct CoordinatorEnd<T, S> {
    mailbox: Arc<Mailbox<T, S>>,
    poller: Poller,
    next: usize,
    filled: Option<usize>,
    local: Report,
}

impl<T, S> CoordinatorEnd<T, S> {
    pub(crate) fn new(mailbox: Arc<Mailbox<T, S>>, poller: Poller) -> Self {
        Self {
            mailbox,
            poller,
            next: 0,
            filled: None,
            local: Report::new(),
        }
    }

    /// Waits for the worker to finish its startup and takes the resource it
    /// shares.
    ///
    /// # Returns
    /// The shared resource, or an error if cancelled or the worker answered
    /// with anything but a ready request.
    pub fn await_ready(&mut self) -> Result<Arc<S>> {
        let mailbox = &self.mailbox;
        let word = self.poller.wait_while(&mailbox.req, 0)?;

        if Request::decode(word) != Request::Ready {
            return Err(CommsErr::UnexpectedRequest {
                expected: "ready",
                got: word,
            });
        }

        // SAFETY: `req` is set, so the worker is done writing `shared` and
        //         will not touch it again until we clear the request.
        let shared = unsafe { (*mailbox.shared.get()).take() };
        mailbox.req.publish(Request::Idle.encode());

        shared.ok_or(CommsErr::MissingAnnouncement)
    }

    /// Writes the next batch slot of the ring.
    ///
    /// Polls until the worker has returned the slot if it is still using it.
    ///
    /// # Arguments
    /// * `write` - Fills the slot contents.
    ///
    /// # Returns
    /// Whatever `write` returns, or an error if cancelled.
    ///
    /// # Panics
    /// If a previously filled slot has not been submitted yet.
    pub fn fill<F, R>(&mut self, write: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        assert!(
            self.filled.is_none(),
            "the previously filled slot was never submitted"
        );

        let idx = self.next;
        let ring = &self.mailbox.ring;
        self.poller.wait_for(|| !ring.is_lent(idx))?;

        // SAFETY: This end is the only coordinator handle and the slot is
        //         owned by the coordinator, the reference dies with `write`.
        let out = write(unsafe { ring.get_mut(idx) });

        self.filled = Some(idx);
        self.next = (idx + 1) % ring.len();
        Ok(out)
    }

    /// Submits `cmd` referencing the last filled slot.
    ///
    /// Waits for the worker to acknowledge the previous command first, the
    /// slot reference is published before the command word.
    ///
    /// # Arguments
    /// * `cmd` - The command to send.
    ///
    /// # Returns
    /// An error if cancelled while waiting for the acknowledgement.
    ///
    /// # Panics
    /// If no slot was filled since the last submission.
    pub fn submit(&mut self, cmd: Command) -> Result<()> {
        let mailbox = &self.mailbox;
        self.poller.wait_until(&mailbox.cmd, 0)?;

        let Some(idx) = self.filled.take() else {
            panic!("submitting {cmd} without filling a slot");
        };

        mailbox.ring.lend(idx);
        mailbox.slot.publish(idx as u64);
        mailbox.cmd.publish(cmd.encode());

        debug!(slot = idx; "submitted {cmd}");
        Ok(())
    }

    /// Whether the worker has taken the last submitted command.
    pub fn is_acknowledged(&self) -> bool {
        self.mailbox.cmd.observe() == 0
    }

    /// Waits for the worker to publish a report and copies it locally.
    ///
    /// # Returns
    /// The local copy of the report, valid until the next call.
    pub fn wait_report(&mut self) -> Result<&Report> {
        let word = self.poller.wait_while(&self.mailbox.req, 0)?;
        self.take_report(word)
    }

    /// Takes a report if one is pending, without waiting.
    ///
    /// # Returns
    /// The local copy of the report if the worker published one.
    pub fn try_report(&mut self) -> Result<Option<&Report>> {
        match self.mailbox.req.observe() {
            0 => Ok(None),
            word => self.take_report(word).map(Some),
        }
    }

    fn take_report(&mut self, word: u64) -> Result<&Report> {
        let mailbox = &self.mailbox;

        if Request::decode(word) != Request::Report {
            return Err(CommsErr::UnexpectedRequest {
                expected: "report",
                got: word,
            });
        }

        // SAFETY: `req` is set, so the worker does not write the report until
        //         we clear it below, after the copy.
        self.local.clone_from(unsafe { &*mailbox.report.get() });
        mailbox.req.publish(Request::Idle.encode());

        debug!("took report: {}", self.local.msg());
        Ok(&self.local)
    }

    /// Publishes how many reports the coordinator has consumed.
    pub fn publish_progress(&self, n: u64) {
        self.mailbox.progress.publish(n);
    }

    pub fn progress(&self) -> u64 {
        self.mailbox.progress.observe()
    }

    pub fn poller(&self) -> &Poller {
        &self.poller
    }
}

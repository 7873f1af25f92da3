use std::{thread, time::Duration};

use tokio_util::sync::CancellationToken;

use crate::{CommsErr, Result, SharedWord};

/// Fixed interval busy-wait over shared words.
///
/// There is no backoff and no timeout: a stalled peer stalls the caller
/// forever unless the cancellation token fires.
#[derive(Debug, Clone)]
pub struct Poller {
    interval: Duration,
    cancel: CancellationToken,
}

impl Default for Poller {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

impl Poller {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_micros(10);

    /// Creates a new `Poller` that can never be cancelled.
    ///
    /// # Arguments
    /// * `interval` - The delay between two reads, zero spins.
    ///
    /// # Returns
    /// A new `Poller` instance.
    pub fn new(interval: Duration) -> Self {
        Self::with_cancellation(interval, CancellationToken::new())
    }

    /// Creates a new `Poller` that gives up once `cancel` fires.
    ///
    /// # Arguments
    /// * `interval` - The delay between two reads, zero spins.
    /// * `cancel` - A token shared with whoever may stop the wait.
    ///
    /// # Returns
    /// A new `Poller` instance.
    pub fn with_cancellation(interval: Duration, cancel: CancellationToken) -> Self {
        Self { interval, cancel }
    }

    /// Returns the cancellation token of this poller.
    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Polls while `word` holds `value`.
    ///
    /// # Arguments
    /// * `word` - The shared word to watch.
    /// * `value` - The value to wait away from.
    ///
    /// # Returns
    /// The first observed value different from `value`, or `CommsErr::Cancelled`.
    pub fn wait_while(&self, word: &SharedWord, value: u64) -> Result<u64> {
        let mut observed = word.observe();
        while observed == value {
            self.pause()?;
            observed = word.observe();
        }

        Ok(observed)
    }

    /// Polls until `word` holds `value`.
    ///
    /// # Arguments
    /// * `word` - The shared word to watch.
    /// * `value` - The value to wait for.
    ///
    /// # Returns
    /// `value` once observed, or `CommsErr::Cancelled`.
    pub fn wait_until(&self, word: &SharedWord, value: u64) -> Result<u64> {
        while word.observe() != value {
            self.pause()?;
        }

        Ok(value)
    }

    /// Polls until `ready` returns true.
    ///
    /// # Arguments
    /// * `ready` - A predicate over shared state, re-evaluated on every poll.
    ///
    /// # Returns
    /// `Ok(())` once the predicate holds, or `CommsErr::Cancelled`.
    pub fn wait_for<F: FnMut() -> bool>(&self, mut ready: F) -> Result<()> {
        while !ready() {
            self.pause()?;
        }

        Ok(())
    }

    fn pause(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(CommsErr::Cancelled);
        }

        if self.interval.is_zero() {
            std::hint::spin_loop();
        } else {
            thread::sleep(self.interval);
        }

        Ok(())
    }
}

//! Tick budget for a single wait call.

use crate::error::{Result, WaitError};
use std::time::Duration;

/// Number of poll ticks a wait may spend before it times out.
///
/// Computed once at the start of a wait call and never changed afterwards.
/// A timeout that is not a whole multiple of the poll interval rounds up, so
/// a wait never gives up before its full timeout has been spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    timeout: Duration,
    poll_interval: Duration,
    ticks: u32,
}

impl Deadline {
    /// Creates a deadline, rejecting zero timings.
    pub fn new(timeout: Duration, poll_interval: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(WaitError::InvalidTimeout(timeout));
        }
        if poll_interval.is_zero() {
            return Err(WaitError::InvalidPollInterval(poll_interval));
        }

        let interval = poll_interval.as_nanos();
        let ticks = timeout.as_nanos().div_ceil(interval);
        let ticks = u32::try_from(ticks).unwrap_or(u32::MAX);

        Ok(Self {
            timeout,
            poll_interval,
            ticks,
        })
    }

    /// Timeout the deadline was built from.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Length of one tick.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Total ticks available.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Host-loop time spent after `ticks` ticks.
    pub fn elapsed_after(&self, ticks: u32) -> Duration {
        self.poll_interval.saturating_mul(ticks)
    }
}

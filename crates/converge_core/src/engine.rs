//! The condition-wait engine.
//!
//! Every wait follows the same contract:
//!
//! 1. Malformed input (zero timeout, zero `min_count`, unresolvable path) is
//!    rejected before the first tick.
//! 2. Each tick first yields to the host loop for one poll interval, then
//!    evaluates the condition once. The condition is never checked before
//!    the first yield, so an action dispatched right before the wait gets at
//!    least one slice to propagate.
//! 3. After the last tick the wait fails with [`WaitError::TimedOut`].

use crate::config::WaitConfig;
use crate::deadline::Deadline;
use crate::error::{ConditionKind, Result, WaitError};
use crate::host::HostLoop;
use crate::notification::{NotificationSource, Subscription};
use crate::observe::{Collection, Observe, SettingsHolder};
use crate::path::{Lookup, Resolve};
use std::time::Duration;
use tracing::{debug, trace};

/// Outcome of a polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The condition held at the given tick (1-based).
    Satisfied {
        /// Tick at which the condition was first seen to hold
        ticks: u32,
    },
    /// The deadline passed with the condition still false.
    TimedOut {
        /// Ticks spent, always the full deadline
        ticks: u32,
    },
}

impl WaitOutcome {
    /// True for [`WaitOutcome::Satisfied`].
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied { .. })
    }

    /// Ticks spent either way.
    pub fn ticks(&self) -> u32 {
        match self {
            Self::Satisfied { ticks } | Self::TimedOut { ticks } => *ticks,
        }
    }
}

/// Successful wait, carrying what the satisfying check observed.
#[derive(Debug, Clone, PartialEq)]
pub struct Satisfied<T = ()> {
    /// Value seen by the satisfying check.
    pub value: T,
    /// Tick at which the condition held.
    pub ticks: u32,
    /// Host-loop time spent waiting.
    pub waited: Duration,
}

/// Blocks the calling thread on conditions, yielding to a host loop.
pub struct Waiter<H> {
    host: H,
    config: WaitConfig,
}

impl<H: HostLoop> Waiter<H> {
    /// Creates a waiter with the given host loop and timing.
    pub fn new(host: H, config: WaitConfig) -> Self {
        Self { host, config }
    }

    /// Creates a waiter with default timing (10 s timeout, 100 ms ticks).
    pub fn with_defaults(host: H) -> Self {
        Self::new(host, WaitConfig::default())
    }

    /// Timing in use.
    pub fn config(&self) -> &WaitConfig {
        &self.config
    }

    /// The host loop.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host loop, e.g. to schedule simulated work.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Gives the host loop back.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Build the deadline for one call. `None` uses the configured default.
    pub fn deadline(&self, timeout: Option<Duration>) -> Result<Deadline> {
        Deadline::new(
            timeout.unwrap_or_else(|| self.config.timeout()),
            self.config.poll_interval(),
        )
    }

    /// Run the shared polling loop without turning a timeout into an error.
    ///
    /// An error returned by `condition` aborts the loop immediately.
    pub fn poll<F>(&mut self, label: &str, timeout: Option<Duration>, condition: F) -> Result<WaitOutcome>
    where
        F: FnMut() -> Result<bool>,
    {
        let deadline = self.deadline(timeout)?;
        self.run(&deadline, label, condition)
    }

    /// Wait for a caller-supplied predicate.
    pub fn wait_until<F>(&mut self, label: &str, timeout: Option<Duration>, mut condition: F) -> Result<Satisfied>
    where
        F: FnMut() -> bool,
    {
        let deadline = self.deadline(timeout)?;
        let outcome = self.run(&deadline, label, || Ok(condition()))?;
        finish(&deadline, ConditionKind::Custom, label, outcome, ())
    }

    /// Wait until `collection` holds at least `min_count` elements and its
    /// first element is real data rather than a placeholder.
    ///
    /// Returns the element count seen by the satisfying check.
    pub fn wait_for_collection_populated<C, O, P>(
        &mut self,
        label: &str,
        collection: &O,
        min_count: usize,
        is_placeholder: P,
        timeout: Option<Duration>,
    ) -> Result<Satisfied<usize>>
    where
        C: Collection + ?Sized,
        O: Observe<C> + ?Sized,
        P: Fn(&C::Item) -> bool,
    {
        if min_count == 0 {
            return Err(WaitError::InvalidMinCount(min_count));
        }
        let deadline = self.deadline(timeout)?;

        let mut seen = 0;
        let outcome = self.run(&deadline, label, || {
            let (count, populated) = collection.observe(|c| {
                let count = c.count();
                let real_first = c.first().is_some_and(|first| !is_placeholder(first));
                (count, count >= min_count && real_first)
            });
            seen = count;
            Ok(populated)
        })?;

        finish(&deadline, ConditionKind::Collection, label, outcome, seen)
    }

    /// Wait until the value named by `path` is present on `root`.
    ///
    /// The path is resolved once before the first tick so that a structural
    /// mistake fails immediately instead of after the timeout.
    pub fn wait_for_named_value<R, O, P>(
        &mut self,
        root: &O,
        path: &P,
        timeout: Option<Duration>,
    ) -> Result<Satisfied<P::Value>>
    where
        R: ?Sized,
        O: Observe<R> + ?Sized,
        P: Resolve<R>,
    {
        let deadline = self.deadline(timeout)?;
        let label = path.label();
        root.observe(|r| path.resolve(r))?;

        let mut found = None;
        let outcome = self.run(&deadline, &label, || {
            match root.observe(|r| path.resolve(r))? {
                Lookup::Present(value) => {
                    found = Some(value);
                    Ok(true)
                }
                Lookup::Pending => Ok(false),
            }
        })?;

        match (outcome, found) {
            (WaitOutcome::Satisfied { ticks }, Some(value)) => {
                Ok(satisfied(&deadline, &label, ticks, value))
            }
            (outcome, _) => Err(timed_out(
                &deadline,
                ConditionKind::NamedValue,
                &label,
                outcome.ticks(),
            )),
        }
    }

    /// Wait until a settings holder has received its settings.
    pub fn wait_for_settings<S, O>(
        &mut self,
        label: &str,
        holder: &O,
        timeout: Option<Duration>,
    ) -> Result<Satisfied<S::Settings>>
    where
        S: SettingsHolder + ?Sized,
        O: Observe<S> + ?Sized,
    {
        let deadline = self.deadline(timeout)?;

        let mut found = None;
        let outcome = self.run(&deadline, label, || {
            found = holder.observe(|h| h.settings().cloned());
            Ok(found.is_some())
        })?;

        match (outcome, found) {
            (WaitOutcome::Satisfied { ticks }, Some(settings)) => {
                Ok(satisfied(&deadline, label, ticks, settings))
            }
            (outcome, _) => Err(timed_out(
                &deadline,
                ConditionKind::Settings,
                label,
                outcome.ticks(),
            )),
        }
    }

    /// Subscribe to `source` and wait for its next notification.
    ///
    /// A notification fired before this call subscribed is not seen; use
    /// [`wait_for_subscription`](Self::wait_for_subscription) when the caller
    /// triggers the action.
    pub fn wait_for_notification<S>(
        &mut self,
        source: &S,
        timeout: Option<Duration>,
    ) -> Result<Satisfied<S::Payload>>
    where
        S: NotificationSource + ?Sized,
    {
        let deadline = self.deadline(timeout)?;
        let subscription = source.subscribe();
        self.await_subscription(&deadline, subscription)
    }

    /// Wait on a subscription the caller created before triggering the action.
    pub fn wait_for_subscription<P>(
        &mut self,
        subscription: Subscription<P>,
        timeout: Option<Duration>,
    ) -> Result<Satisfied<P>> {
        let deadline = self.deadline(timeout)?;
        self.await_subscription(&deadline, subscription)
    }

    fn await_subscription<P>(
        &mut self,
        deadline: &Deadline,
        mut subscription: Subscription<P>,
    ) -> Result<Satisfied<P>> {
        let label = subscription.signal().to_string();

        let mut payload = None;
        let outcome = self.run(deadline, &label, || {
            payload = subscription.try_take();
            Ok(payload.is_some())
        })?;

        match (outcome, payload) {
            (WaitOutcome::Satisfied { ticks }, Some(payload)) => {
                Ok(satisfied(deadline, &label, ticks, payload))
            }
            (outcome, _) => Err(timed_out(
                deadline,
                ConditionKind::Notification,
                &label,
                outcome.ticks(),
            )),
        }
    }

    fn run<F>(&mut self, deadline: &Deadline, label: &str, mut condition: F) -> Result<WaitOutcome>
    where
        F: FnMut() -> Result<bool>,
    {
        debug!(
            condition = label,
            ticks = deadline.ticks(),
            timeout_ms = deadline.timeout().as_millis() as u64,
            "waiting"
        );

        for tick in 1..=deadline.ticks() {
            self.host.process_events(deadline.poll_interval());
            if condition()? {
                return Ok(WaitOutcome::Satisfied { ticks: tick });
            }
            trace!(condition = label, tick, "not yet");
        }

        Ok(WaitOutcome::TimedOut {
            ticks: deadline.ticks(),
        })
    }
}

fn finish<T>(
    deadline: &Deadline,
    kind: ConditionKind,
    label: &str,
    outcome: WaitOutcome,
    value: T,
) -> Result<Satisfied<T>> {
    match outcome {
        WaitOutcome::Satisfied { ticks } => Ok(satisfied(deadline, label, ticks, value)),
        WaitOutcome::TimedOut { ticks } => Err(timed_out(deadline, kind, label, ticks)),
    }
}

fn satisfied<T>(deadline: &Deadline, label: &str, ticks: u32, value: T) -> Satisfied<T> {
    let waited = deadline.elapsed_after(ticks);
    debug!(
        condition = label,
        ticks,
        waited_ms = waited.as_millis() as u64,
        "condition satisfied"
    );
    Satisfied {
        value,
        ticks,
        waited,
    }
}

fn timed_out(deadline: &Deadline, kind: ConditionKind, label: &str, ticks: u32) -> WaitError {
    debug!(
        kind = %kind,
        condition = label,
        ticks,
        timeout_ms = deadline.timeout().as_millis() as u64,
        "wait timed out"
    );
    WaitError::TimedOut {
        kind,
        label: label.to_string(),
        timeout: deadline.timeout(),
        ticks,
    }
}

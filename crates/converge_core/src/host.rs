//! Host event loops the engine yields to between condition checks.
//!
//! A wait never blocks anywhere except inside [`HostLoop::process_events`].
//! In a GUI harness that call pumps the toolkit's event queue; in a plain test
//! it sleeps; under [`SimulatedLoop`] it advances a virtual clock and runs
//! whatever background work was scheduled for that slice.

use std::time::Duration;
use tracing::trace;

/// "Process pending events for N" capability.
pub trait HostLoop {
    /// Let background work and UI updates run for `duration`.
    fn process_events(&mut self, duration: Duration);
}

/// Host loop that just sleeps the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepLoop;

impl HostLoop for SleepLoop {
    fn process_events(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Adapts a toolkit's own event-pump function.
pub struct PumpLoop<F> {
    pump: F,
}

impl<F> PumpLoop<F>
where
    F: FnMut(Duration),
{
    /// Wraps a function that processes events for the given duration.
    pub fn new(pump: F) -> Self {
        Self { pump }
    }
}

impl<F> HostLoop for PumpLoop<F>
where
    F: FnMut(Duration),
{
    fn process_events(&mut self, duration: Duration) {
        (self.pump)(duration)
    }
}

type Action = Box<dyn FnOnce(&mut SimulatedLoop)>;

struct ScheduledEvent {
    due: Duration,
    seq: u64,
    action: Action,
}

/// Deterministic host loop driven by a virtual clock.
///
/// Events scheduled with [`schedule`](Self::schedule) run during the slice in
/// which their due time falls, in due-time order (ties in scheduling order).
/// An event may schedule further events; those run in the same slice if they
/// are already due.
pub struct SimulatedLoop {
    now: Duration,
    slices: u32,
    next_seq: u64,
    pending: Vec<ScheduledEvent>,
}

impl SimulatedLoop {
    /// Creates a loop at virtual time zero with nothing scheduled.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            slices: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of `process_events` calls served so far.
    pub fn slices(&self) -> u32 {
        self.slices
    }

    /// Number of events not yet run.
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Schedule `action` to run `delay` after the current virtual time.
    pub fn schedule<F>(&mut self, delay: Duration, action: F)
    where
        F: FnOnce(&mut SimulatedLoop) + 'static,
    {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(ScheduledEvent {
            due: self.now + delay,
            seq,
            action: Box::new(action),
        });
    }

    /// Advance virtual time without counting a slice, running due events.
    pub fn advance(&mut self, duration: Duration) {
        let until = self.now + duration;
        while let Some(event) = self.take_next_due(until) {
            self.now = self.now.max(event.due);
            (event.action)(self);
        }
        self.now = until;
    }

    fn take_next_due(&mut self, until: Duration) -> Option<ScheduledEvent> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(i, _)| i)?;
        Some(self.pending.swap_remove(index))
    }
}

impl Default for SimulatedLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl HostLoop for SimulatedLoop {
    fn process_events(&mut self, duration: Duration) {
        self.advance(duration);
        self.slices += 1;
        trace!(slice = self.slices, now_ms = self.now.as_millis() as u64, "host loop slice");
    }
}

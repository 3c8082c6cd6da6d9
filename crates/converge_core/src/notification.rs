//! One-shot notifications.
//!
//! A [`Signal`] is the application-side emitter. Every call to
//! [`Signal::subscribe`] creates a fresh single-slot channel; the next
//! [`Signal::emit`] fills each live slot once and forgets those subscribers.
//! A wait holds exactly one [`Subscription`] for its own duration and drops it
//! when it returns.
//!
//! Emissions are not buffered for future subscribers: a signal emitted before
//! anybody subscribed is gone. Callers that trigger the action themselves
//! should subscribe first and then wait on the subscription.

use std::sync::{Mutex, PoisonError};
use tokio::sync::oneshot;
use tracing::debug;

/// Source of one-shot notifications.
pub trait NotificationSource {
    /// Value carried by a notification; `()` for signals without arguments.
    type Payload;

    /// Name used in logs and timeout messages.
    fn name(&self) -> &str;

    /// Attach a new single-use subscriber.
    fn subscribe(&self) -> Subscription<Self::Payload>;
}

/// Single-use receiving end of a notification.
#[derive(Debug)]
pub struct Subscription<P> {
    signal: String,
    receiver: oneshot::Receiver<P>,
}

impl<P> Subscription<P> {
    /// Wrap the receiving half of a oneshot channel.
    pub fn new(signal: impl Into<String>, receiver: oneshot::Receiver<P>) -> Self {
        Self {
            signal: signal.into(),
            receiver,
        }
    }

    /// Name of the signal this subscription listens to.
    pub fn signal(&self) -> &str {
        &self.signal
    }

    /// Take the payload if the notification has fired. Never blocks.
    pub fn try_take(&mut self) -> Option<P> {
        self.receiver.try_recv().ok()
    }
}

/// Multi-shot emitter handing out one-shot subscriptions.
///
/// `Signal` is `Sync`, so background threads can emit into it while a wait
/// polls on the host thread.
#[derive(Debug)]
pub struct Signal<P> {
    name: String,
    subscribers: Mutex<Vec<oneshot::Sender<P>>>,
}

impl<P: Clone> Signal<P> {
    /// Creates a signal with no subscribers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Name of the signal.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach a new subscriber.
    pub fn subscribe(&self) -> Subscription<P> {
        let (sender, receiver) = oneshot::channel();
        self.lock().push(sender);
        Subscription::new(self.name.clone(), receiver)
    }

    /// Deliver `payload` to every live subscriber and detach them.
    ///
    /// Returns how many subscribers received it.
    pub fn emit(&self, payload: P) -> usize {
        let subscribers = std::mem::take(&mut *self.lock());
        let delivered = subscribers
            .into_iter()
            .filter(|sender| !sender.is_closed())
            .map(|sender| sender.send(payload.clone()))
            .filter(|sent| sent.is_ok())
            .count();

        debug!(signal = %self.name, delivered, "signal emitted");
        delivered
    }

    /// Number of subscribers still waiting. Dropped subscriptions are pruned.
    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self.lock();
        subscribers.retain(|sender| !sender.is_closed());
        subscribers.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<oneshot::Sender<P>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P: Clone> NotificationSource for Signal<P> {
    type Payload = P;

    fn name(&self) -> &str {
        &self.name
    }

    fn subscribe(&self) -> Subscription<P> {
        Signal::subscribe(self)
    }
}

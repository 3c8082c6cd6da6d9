//! Read access to state mutated outside the engine.

use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Something the engine can take a fresh look at on every tick.
///
/// The engine only ever reads through this trait; the application layer owns
/// all writes.
pub trait Observe<T: ?Sized> {
    /// Run `f` against the current state.
    fn observe<O>(&self, f: impl FnOnce(&T) -> O) -> O;
}

impl<T: ?Sized> Observe<T> for RefCell<T> {
    fn observe<O>(&self, f: impl FnOnce(&T) -> O) -> O {
        f(&self.borrow())
    }
}

impl<T: ?Sized> Observe<T> for Mutex<T> {
    fn observe<O>(&self, f: impl FnOnce(&T) -> O) -> O {
        let guard = self.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }
}

impl<T: ?Sized> Observe<T> for RwLock<T> {
    fn observe<O>(&self, f: impl FnOnce(&T) -> O) -> O {
        let guard = self.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }
}

impl<T: ?Sized, S: Observe<T> + ?Sized> Observe<T> for Rc<S> {
    fn observe<O>(&self, f: impl FnOnce(&T) -> O) -> O {
        (**self).observe(f)
    }
}

impl<T: ?Sized, S: Observe<T> + ?Sized> Observe<T> for Arc<S> {
    fn observe<O>(&self, f: impl FnOnce(&T) -> O) -> O {
        (**self).observe(f)
    }
}

/// Ordered collection that can report its size and its first element.
pub trait Collection {
    /// Element type.
    type Item;

    /// Current number of elements.
    fn count(&self) -> usize;

    /// First element, if any.
    fn first(&self) -> Option<&Self::Item>;
}

impl<T> Collection for Vec<T> {
    type Item = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }
}

impl<T> Collection for VecDeque<T> {
    type Item = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn first(&self) -> Option<&T> {
        self.front()
    }
}

/// JSON arrays count their elements; every other value is empty.
impl Collection for Value {
    type Item = Value;

    fn count(&self) -> usize {
        self.as_array().map_or(0, Vec::len)
    }

    fn first(&self) -> Option<&Value> {
        self.as_array().and_then(|items| items.first())
    }
}

/// Holder of a settings object that arrives asynchronously.
pub trait SettingsHolder {
    /// Settings type.
    type Settings: Clone;

    /// Settings, once received.
    fn settings(&self) -> Option<&Self::Settings>;
}

impl<T: Clone> SettingsHolder for Option<T> {
    type Settings = T;

    fn settings(&self) -> Option<&T> {
        self.as_ref()
    }
}

//! Converge Core Library
//!
//! Condition waits for end-to-end scenarios that drive an application whose
//! state changes in the background:
//! - Poll a collection until real data (not a loading placeholder) arrives
//! - Poll a named value until it has been computed
//! - Wait for a one-shot notification
//! - Wait for a settings page to receive its settings
//!
//! Every wait yields to a [`HostLoop`] once per tick, checks its condition
//! after the yield, and fails with [`WaitError::TimedOut`] once the deadline
//! is spent.
//!
//! # Quick Start
//!
//! ```
//! use converge_core::{AttrPath, SimulatedLoop, Waiter};
//! use serde_json::json;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let mut waiter = Waiter::with_defaults(SimulatedLoop::new());
//! let window = Rc::new(RefCell::new(json!({"downloads_page": {"downloads": null}})));
//!
//! // Background work lands 300ms from now.
//! let w = window.clone();
//! waiter.host_mut().schedule(Duration::from_millis(300), move |_| {
//!     w.borrow_mut()["downloads_page"]["downloads"] = json!([]);
//! });
//!
//! let path = AttrPath::parse("downloads_page.downloads").unwrap();
//! let result = waiter.wait_for_named_value(&window, &path, None).unwrap();
//! assert_eq!(result.ticks, 3);
//! ```
//!
//! # Notifications
//!
//! ```
//! use converge_core::{Signal, SimulatedLoop, Waiter};
//! use std::time::Duration;
//!
//! let mut waiter = Waiter::with_defaults(SimulatedLoop::new());
//! let signal = Signal::<()>::new("tribler_started");
//!
//! let err = waiter
//!     .wait_for_notification(&signal, Some(Duration::from_secs(1)))
//!     .unwrap_err();
//! assert!(err.is_timeout());
//! ```

mod config;
mod deadline;
mod engine;
mod error;
mod host;
mod notification;
mod observe;
mod path;

pub use config::{Config, WaitConfig, CONFIG_FILE_NAME};
pub use deadline::Deadline;
pub use engine::{Satisfied, WaitOutcome, Waiter};
pub use error::{ConditionKind, Result, WaitError};
pub use host::{HostLoop, PumpLoop, SimulatedLoop, SleepLoop};
pub use notification::{NotificationSource, Signal, Subscription};
pub use observe::{Collection, Observe, SettingsHolder};
pub use path::{Accessor, AttrPath, Lookup, Resolve};

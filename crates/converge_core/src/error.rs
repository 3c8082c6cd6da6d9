//! Error types for wait operations.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Which family of condition a wait was polling.
///
/// Used to phrase timeout messages the way scenario authors read them
/// ("list `downloads` was not populated", "signal `tribler_started` was not raised").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    /// A collection reaching a minimum size with real data at the front.
    Collection,
    /// A named value becoming present.
    NamedValue,
    /// A one-shot notification firing.
    Notification,
    /// A settings holder receiving its settings.
    Settings,
    /// A caller-supplied predicate.
    Custom,
}

impl ConditionKind {
    /// Phrase describing the unmet condition on timeout.
    pub fn unmet(&self) -> &'static str {
        match self {
            Self::Collection => "was not populated",
            Self::NamedValue => "was not set",
            Self::Notification => "was not raised",
            Self::Settings => "were not received",
            Self::Custom => "did not hold",
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = match self {
            Self::Collection => "list",
            Self::NamedValue => "variable",
            Self::Notification => "signal",
            Self::Settings => "settings",
            Self::Custom => "condition",
        };
        f.write_str(noun)
    }
}

/// Core error type for wait operations.
#[derive(Error, Debug)]
pub enum WaitError {
    /// The condition did not hold before the deadline.
    #[error("{} `{}` {} within {:?} ({} ticks)", .kind, .label, .kind.unmet(), .timeout, .ticks)]
    TimedOut {
        /// Family of the condition that timed out
        kind: ConditionKind,
        /// Name of the list, variable or signal
        label: String,
        /// Timeout the caller asked for
        timeout: Duration,
        /// Number of poll ticks spent
        ticks: u32,
    },

    /// A path segment could not be resolved against the root object.
    #[error("cannot resolve `{path}`: segment `{segment}` {reason}")]
    Resolution {
        /// Full path being resolved
        path: String,
        /// First segment that failed
        segment: String,
        /// What was wrong at that segment
        reason: String,
    },

    /// Path text is empty or contains an empty segment.
    #[error("invalid path `{path}`: {reason}")]
    InvalidPath {
        /// The rejected path text
        path: String,
        /// Why it was rejected
        reason: String,
    },

    /// Timeout must be strictly positive.
    #[error("timeout must be greater than zero, got {0:?}")]
    InvalidTimeout(Duration),

    /// Poll interval must be strictly positive.
    #[error("poll interval must be greater than zero, got {0:?}")]
    InvalidPollInterval(Duration),

    /// Collection waits need at least one element.
    #[error("minimum element count must be at least 1, got {0}")]
    InvalidMinCount(usize),

    /// Configuration error (loading, parsing, invalid values).
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl WaitError {
    /// True when the condition simply did not converge in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }

    /// True for mistakes in how the wait was written, as opposed to a slow application.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::Resolution { .. }
                | Self::InvalidPath { .. }
                | Self::InvalidTimeout(_)
                | Self::InvalidPollInterval(_)
                | Self::InvalidMinCount(_)
        )
    }

    /// Returns a user-friendly recovery suggestion for the error, if available.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::TimedOut {
                kind: ConditionKind::Notification,
                ..
            } => Some(
                "Subscribe before triggering the action; a notification fired before the wait started is lost.",
            ),
            Self::TimedOut { .. } => {
                Some("The application may be slow or stuck. Retry with a longer --timeout.")
            }
            Self::Resolution { .. } | Self::InvalidPath { .. } => {
                Some("Check the path spelling against the state tree; this is not a timing issue.")
            }
            Self::ConfigError(_) => Some("Fix or remove converge.toml to fall back to defaults."),
            _ => None,
        }
    }
}

/// Convenience Result type for wait operations.
pub type Result<T> = std::result::Result<T, WaitError>;

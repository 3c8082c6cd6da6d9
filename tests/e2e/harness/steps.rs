use std::time::Duration;

use super::assertions::Assertion;
use super::client::{Control, ListId, SignalId};

/// All possible actions in a test scenario
#[derive(Debug)]
pub enum ScenarioStep {
    // User input
    Click {
        control: Control,
    },
    TypeText {
        text: String,
    },

    // Waits
    WaitForList {
        list: ListId,
        min_count: usize,
        timeout: Option<Duration>,
    },
    WaitForValue {
        path: String,
        timeout: Option<Duration>,
    },
    WaitForSignal {
        signal: SignalId,
        timeout: Option<Duration>,
    },
    /// Subscribe now, collect the notification in a later `AwaitSignal`
    ArmSignal {
        signal: SignalId,
    },
    AwaitSignal {
        signal: SignalId,
        timeout: Option<Duration>,
    },
    WaitForSettings {
        timeout: Option<Duration>,
    },
    /// First row of the home table holds real content
    WaitForHomeTable {
        timeout: Option<Duration>,
    },

    // Time and environment
    Idle {
        duration: Duration,
    },
    DisconnectBackend,

    // Verification
    Assert {
        assertion: Assertion,
    },
}

impl ScenarioStep {
    /// Override the timeout of a wait step; false for steps that do not wait.
    pub fn set_timeout(&mut self, value: Duration) -> bool {
        match self {
            ScenarioStep::WaitForList { timeout, .. }
            | ScenarioStep::WaitForValue { timeout, .. }
            | ScenarioStep::WaitForSignal { timeout, .. }
            | ScenarioStep::AwaitSignal { timeout, .. }
            | ScenarioStep::WaitForSettings { timeout }
            | ScenarioStep::WaitForHomeTable { timeout } => {
                *timeout = Some(value);
                true
            }
            _ => false,
        }
    }
}

//! Per-machine configuration.

use crate::core::{State, StateHistory};
use serde::{Deserialize, Serialize};

/// How much transition history a machine keeps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryPolicy {
    /// Keep nothing.
    #[default]
    Disabled,
    /// Keep the most recent `n` transitions.
    Bounded(usize),
    /// Keep every transition for the lifetime of the machine.
    Unbounded,
}

impl HistoryPolicy {
    pub(crate) fn new_history<S: State>(self) -> Option<StateHistory<S>> {
        match self {
            Self::Disabled => None,
            Self::Bounded(limit) => Some(StateHistory::bounded(limit)),
            Self::Unbounded => Some(StateHistory::new()),
        }
    }
}

/// Options accepted by [`Machine::with_options`](super::Machine::with_options).
///
/// Options deserialize from any serde format, and missing fields fall back
/// to their defaults:
///
/// ```rust
/// use treestate::machine::{HistoryPolicy, MachineOptions};
///
/// let options: MachineOptions = serde_json::from_str(r#"{"history":{"bounded":16}}"#).unwrap();
/// assert_eq!(options.history, HistoryPolicy::Bounded(16));
///
/// let defaults: MachineOptions = serde_json::from_str("{}").unwrap();
/// assert_eq!(defaults, MachineOptions::default());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineOptions {
    pub history: HistoryPolicy,
}

impl MachineOptions {
    pub fn history(mut self, policy: HistoryPolicy) -> Self {
        self.history = policy;
        self
    }
}

//! Errors surfaced by `Machine::fire` and related calls.
//!
//! "No matching transition" is not an error: `fire` returns `Ok(false)` for
//! it. Everything here is exceptional.

use thiserror::Error;

/// Error type returned by user actions, deferred destinations and listeners.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while dispatching an event.
///
/// The variants differ in whether the state change was committed:
/// - `ReentrantDispatch`, `DestinationUnresolved`, `UnknownDestination`,
///   `DisjointHierarchy`, `ExitAction` and `TransitionAction` leave the
///   current state untouched.
/// - `IncompleteEntry` and `Listener` are raised after the new state was
///   committed.
///
/// State and event fields hold the identity's `Debug` rendering, so a `&str`
/// state `"Idle"` appears as `"\"Idle\""` while an enum variant `Idle`
/// appears as `"Idle"`.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Machine is already dispatching an event")]
    ReentrantDispatch,

    #[error("Deferred destination for transition from {from} failed")]
    DestinationUnresolved {
        from: String,
        #[source]
        source: BoxError,
    },

    #[error("Deferred destination for transition from {from} resolved to unregistered state {to}")]
    UnknownDestination { from: String, to: String },

    #[error("States {from} and {to} share no common ancestor")]
    DisjointHierarchy { from: String, to: String },

    #[error("Exit action of {state} failed")]
    ExitAction {
        state: String,
        #[source]
        source: BoxError,
    },

    #[error("Transition action from {from} to {to} failed")]
    TransitionAction {
        from: String,
        to: String,
        #[source]
        source: BoxError,
    },

    #[error("Entered {destination} but entry action of {state} failed")]
    IncompleteEntry {
        destination: String,
        state: String,
        #[source]
        source: BoxError,
    },

    #[error("Listener {index} failed")]
    Listener {
        index: usize,
        #[source]
        source: BoxError,
    },
}

impl DispatchError {
    /// True when the machine's current state was updated before the error.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::IncompleteEntry { .. } | Self::Listener { .. })
    }
}

//! Configuration errors raised while declaring or validating a structure.

use thiserror::Error;

/// Errors that can occur when building a structure or creating a machine.
///
/// All of these are fatal to construction: no partially usable structure or
/// machine is ever returned alongside them.
///
/// State and event fields hold the identity's `Debug` rendering, so a `&str`
/// state `"Idle"` appears as `"\"Idle\""` while an enum variant `Idle`
/// appears as `"Idle"`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Parent state {parent} of {state} is not registered. Declare the parent first")]
    InvalidParent { state: String, parent: String },

    #[error("Making {parent} the parent of {state} would create a cycle")]
    CyclicHierarchy { state: String, parent: String },

    #[error("States {from} and {to} share no common ancestor")]
    DisjointHierarchy { from: String, to: String },

    #[error("Transition from {from} targets unregistered state {to}")]
    UnknownState { from: String, to: String },

    #[error("Starting state {0} is not registered in the structure")]
    UnknownStartingState(String),

    #[error("Structure validation failed with {} errors", .0.len())]
    Invalid(Vec<BuildError>),
}

impl BuildError {
    /// Flatten into the individual problems this error reports.
    pub fn problems(&self) -> Vec<&BuildError> {
        match self {
            Self::Invalid(errors) => errors.iter().flat_map(BuildError::problems).collect(),
            other => vec![other],
        }
    }
}

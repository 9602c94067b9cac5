//! Core identity and bookkeeping types.
//!
//! This module contains the pieces every other layer builds on:
//! - State and event identity via the `State` and `Event` traits
//! - Guard predicates for choosing between candidate transitions
//! - Records of committed transitions and the history that retains them

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, TransitionRecord};
pub use state::{Event, State};

pub(crate) use state::describe;

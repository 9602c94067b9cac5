//! Running machines: resolution, dispatch and notification.
//!
//! # Key Concepts
//!
//! - **Resolver**: finds the innermost state handling an event and the first
//!   candidate whose guard passes
//! - **Machine**: owns the current state and context, executes transitions
//!   and commits them
//! - **Listeners**: observers called after each committed transition
//!
//! Everything runs synchronously on the caller's thread. There are no
//! background tasks, timeouts or cancellation.

mod dispatcher;
mod error;
mod listener;
mod options;
mod resolver;

pub use dispatcher::{Machine, TransitionPath};
pub use error::{BoxError, DispatchError};
pub use listener::{Listener, ListenerRegistry};
pub use options::{HistoryPolicy, MachineOptions};
pub use resolver::{Resolution, Resolver};

//! Treestate: a hierarchical state machine engine
//!
//! States form a forest of parent/child trees. Transitions are declared per
//! (state, event) pair, may be guarded, and may carry an action. A running
//! [`Machine`] resolves each event against the innermost state that handles
//! it, exits and enters states around the least common ancestor of source
//! and destination, and notifies listeners once the new state is committed.
//!
//! # Core Concepts
//!
//! - **Structure**: the immutable definition: states, parents, entry/exit
//!   actions and the transition table
//! - **Innermost wins**: a state declaring any transition for an event
//!   shadows its ancestors for that event, even if all its guards reject
//! - **Commit point**: exit and transition actions run before the new state
//!   is committed, entry actions and listeners after
//!
//! # Example
//!
//! ```rust
//! use treestate::builder::{StructureBuilder, TransitionSpec};
//! use treestate::Machine;
//!
//! #[derive(Clone, PartialEq, Eq, Hash, Debug)]
//! enum Player {
//!     Root,
//!     Stopped,
//!     Playing,
//!     Paused,
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let structure = StructureBuilder::<Player, &str, u32>::new()
//!     .state(Player::Root)?
//!     .child(Player::Stopped, Player::Root)?
//!     .child(Player::Playing, Player::Root)?
//!     .child(Player::Paused, Player::Playing)?
//!     .add_transition(Player::Stopped, "play", TransitionSpec::new().to(Player::Playing))
//!     .add_transition(Player::Playing, "pause", TransitionSpec::new().to(Player::Paused))
//!     .add_transition(Player::Playing, "stop", TransitionSpec::new().to(Player::Stopped))
//!     .on_entry(Player::Playing, |_, _, plays| {
//!         *plays += 1;
//!         Ok(())
//!     })
//!     .build()?;
//!
//! let machine = Machine::new(structure, Player::Stopped, 0)?;
//! machine.fire(&"play")?;
//! machine.fire(&"pause")?;
//! assert_eq!(machine.current_state(), Player::Paused);
//!
//! // Paused declares nothing for "stop", so Playing handles it.
//! machine.fire(&"stop")?;
//! assert_eq!(machine.current_state(), Player::Stopped);
//! assert_eq!(machine.into_context(), 1);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod structure;

// Re-export commonly used types
pub use crate::builder::{BuildError, StructureBuilder, TransitionSpec};
pub use crate::core::{Event, Guard, State, StateHistory, TransitionRecord};
pub use crate::machine::{DispatchError, Machine, MachineOptions};
pub use crate::structure::Structure;

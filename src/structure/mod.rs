//! The compiled, immutable machine definition.
//!
//! A `Structure` combines the state registry, the transition table and the
//! per-state entry/exit actions. It is produced by
//! [`StructureBuilder`](crate::builder::StructureBuilder), never changes
//! afterwards, and is shared read-only (usually behind an `Arc`) by every
//! machine running it.

mod registry;
mod table;
mod transition;

pub use registry::{Ancestors, StateRegistry};
pub use table::TransitionTable;
pub use transition::{Action, Destination, DestinationFn, Transition};

use crate::core::{Event, State};
use std::collections::HashMap;
use std::fmt;

pub struct Structure<S, E, C> {
    pub(crate) registry: StateRegistry<S>,
    pub(crate) table: TransitionTable<S, E, C>,
    pub(crate) entry: HashMap<S, Vec<Action<S, E, C>>>,
    pub(crate) exit: HashMap<S, Vec<Action<S, E, C>>>,
}

impl<S: State, E: Event, C> Structure<S, E, C> {
    pub fn registry(&self) -> &StateRegistry<S> {
        &self.registry
    }

    pub fn table(&self) -> &TransitionTable<S, E, C> {
        &self.table
    }

    pub fn contains(&self, state: &S) -> bool {
        self.registry.contains(state)
    }

    pub fn parent(&self, state: &S) -> Option<&S> {
        self.registry.parent(state)
    }

    /// `state` followed by its ancestors up to the root.
    pub fn ancestors<'a>(&'a self, state: &S) -> Ancestors<'a, S> {
        self.registry.ancestors(state)
    }

    pub fn is_ancestor(&self, ancestor: &S, state: &S) -> bool {
        self.registry.is_ancestor(ancestor, state)
    }

    /// Least common ancestor of two states, `None` if they are disjoint.
    pub fn lca<'a>(&'a self, a: &S, b: &S) -> Option<&'a S> {
        self.registry.lca(a, b)
    }

    /// Candidates declared for exactly `state` and `event`.
    pub fn candidates_for(&self, state: &S, event: &E) -> &[Transition<S, E, C>] {
        self.table.candidates_for(state, event)
    }

    pub fn entry_actions(&self, state: &S) -> &[Action<S, E, C>] {
        self.entry.get(state).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn exit_actions(&self, state: &S) -> &[Action<S, E, C>] {
        self.exit.get(state).map(Vec::as_slice).unwrap_or_default()
    }

    /// Registered states in declaration order.
    pub fn states(&self) -> impl ExactSizeIterator<Item = &S> + '_ {
        self.registry.states()
    }
}

impl<S: fmt::Debug, E, C> fmt::Debug for Structure<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Structure")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

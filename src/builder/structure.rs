//! Builder for constructing structures.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionSpec;
use crate::core::{describe, Event, State};
use crate::machine::BoxError;
use crate::structure::{Action, StateRegistry, Structure, TransitionTable};
use std::collections::HashMap;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for declaring states, actions and transitions.
///
/// Hierarchy problems (unknown parent, cycles) are reported as soon as the
/// offending state is declared. Problems that need the whole picture, such as
/// a transition into another tree, are collected and reported together by
/// [`build`](Self::build).
///
/// # Example
///
/// ```rust
/// use treestate::builder::{StructureBuilder, TransitionSpec};
///
/// # fn main() -> Result<(), treestate::builder::BuildError> {
/// let structure = StructureBuilder::<&str, &str, ()>::new()
///     .state("Root")?
///     .child("Idle", "Root")?
///     .child("Active", "Root")?
///     .add_transition("Idle", "start", TransitionSpec::new().to("Active"))
///     .add_transition("Active", "stop", TransitionSpec::new().to("Idle"))
///     .build()?;
///
/// assert_eq!(structure.parent(&"Idle"), Some(&"Root"));
/// # Ok(())
/// # }
/// ```
pub struct StructureBuilder<S, E, C> {
    registry: StateRegistry<S>,
    table: TransitionTable<S, E, C>,
    entry: HashMap<S, Vec<Action<S, E, C>>>,
    exit: HashMap<S, Vec<Action<S, E, C>>>,
}

impl<S: State, E: Event, C> StructureBuilder<S, E, C> {
    pub fn new() -> Self {
        Self {
            registry: StateRegistry::new(),
            table: TransitionTable::new(),
            entry: HashMap::new(),
            exit: HashMap::new(),
        }
    }

    /// Declare `state`, optionally as a child of an already declared `parent`.
    ///
    /// Declaring a known state again with a parent moves it under that parent.
    pub fn add_state(mut self, state: S, parent: Option<S>) -> Result<Self, BuildError> {
        self.registry.add_state(state, parent)?;
        Ok(self)
    }

    /// Declare a root state.
    pub fn state(self, state: S) -> Result<Self, BuildError> {
        self.add_state(state, None)
    }

    /// Declare `state` as a child of `parent`.
    pub fn child(self, state: S, parent: S) -> Result<Self, BuildError> {
        self.add_state(state, Some(parent))
    }

    /// Append an entry action to `state`, declaring it as a root if unknown.
    pub fn on_entry<F>(mut self, state: S, action: F) -> Self
    where
        F: Fn(&S, &E, &mut C) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.registry.declare(&state);
        self.entry.entry(state).or_default().push(Arc::new(action));
        self
    }

    /// Append an exit action to `state`, declaring it as a root if unknown.
    pub fn on_exit<F>(mut self, state: S, action: F) -> Self
    where
        F: Fn(&S, &E, &mut C) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.registry.declare(&state);
        self.exit.entry(state).or_default().push(Arc::new(action));
        self
    }

    /// Register a candidate transition for `event` while in `state`.
    ///
    /// Candidates for the same state and event are tried in the order they
    /// are added. `state` is declared as a root if unknown.
    pub fn add_transition(mut self, state: S, event: E, spec: TransitionSpec<S, E, C>) -> Self {
        self.registry.declare(&state);
        let transition = spec.into_transition(state.clone());
        self.table.register(state, event, transition);
        self
    }

    /// Validate and freeze the structure.
    ///
    /// Every fixed destination must be a declared state in the same tree as
    /// its source. All violations are reported, not only the first.
    pub fn build(self) -> Result<Structure<S, E, C>, BuildError> {
        match self.validate() {
            Validation::Success(_) => Ok(Structure {
                registry: self.registry,
                table: self.table,
                entry: self.entry,
                exit: self.exit,
            }),
            Validation::Failure(errors) => {
                let mut errors: Vec<BuildError> = errors.iter().cloned().collect();
                errors.sort_by_key(ToString::to_string);
                Err(if errors.len() == 1 {
                    errors.remove(0)
                } else {
                    BuildError::Invalid(errors)
                })
            }
        }
    }

    fn validate(&self) -> Validation<(), NonEmptyVec<BuildError>> {
        let checks: Vec<Validation<(), NonEmptyVec<BuildError>>> = self
            .table
            .iter()
            .filter_map(|(source, _, transition)| {
                let destination = transition.destination.fixed()?;
                Some(self.check_destination(source, destination))
            })
            .collect();

        if checks.is_empty() {
            return Validation::success(());
        }
        Validation::all_vec(checks).map(|_| ())
    }

    fn check_destination(&self, from: &S, to: &S) -> Validation<(), NonEmptyVec<BuildError>> {
        if !self.registry.contains(to) {
            Validation::fail(BuildError::UnknownState {
                from: describe(from),
                to: describe(to),
            })
        } else if self.registry.lca(from, to).is_none() {
            Validation::fail(BuildError::DisjointHierarchy {
                from: describe(from),
                to: describe(to),
            })
        } else {
            Validation::success(())
        }
    }
}

impl<S: State, E: Event, C> Default for StructureBuilder<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

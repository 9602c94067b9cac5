//! Transitions, destinations and actions as stored in a structure.

use crate::core::Guard;
use crate::machine::BoxError;
use std::fmt;
use std::sync::Arc;

/// Side-effecting function run on entry, on exit, or during a transition.
///
/// Receives the state it runs for, the triggering event and the machine
/// context.
pub type Action<S, E, C> = Arc<dyn Fn(&S, &E, &mut C) -> Result<(), BoxError> + Send + Sync>;

/// Zero-argument function that picks a destination at firing time.
pub type DestinationFn<S> = Arc<dyn Fn() -> Result<S, BoxError> + Send + Sync>;

/// Where a transition goes.
pub enum Destination<S> {
    /// A state known at declaration time.
    Fixed(S),
    /// A state chosen when the transition fires.
    Deferred(DestinationFn<S>),
}

impl<S: Clone> Destination<S> {
    /// Produce the concrete destination state.
    pub fn resolve(&self) -> Result<S, BoxError> {
        match self {
            Self::Fixed(state) => Ok(state.clone()),
            Self::Deferred(supplier) => supplier(),
        }
    }

    /// The destination if it is known without running anything.
    pub fn fixed(&self) -> Option<&S> {
        match self {
            Self::Fixed(state) => Some(state),
            Self::Deferred(_) => None,
        }
    }
}

impl<S: Clone> Clone for Destination<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Fixed(state) => Self::Fixed(state.clone()),
            Self::Deferred(supplier) => Self::Deferred(Arc::clone(supplier)),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Destination<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(state) => f.debug_tuple("Fixed").field(state).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// A candidate transition out of `source`.
///
/// Transitions live in the slot for one (state, event) pair. A slot may hold
/// several of them; they are tried in declaration order.
pub struct Transition<S, E, C> {
    pub source: S,
    pub destination: Destination<S>,
    pub guard: Option<Guard<E, C>>,
    pub action: Option<Action<S, E, C>>,
}

impl<S, E, C> Transition<S, E, C> {
    /// True if the guard is absent or passes.
    pub fn is_enabled(&self, event: &E, context: &C) -> bool {
        self.guard.as_ref().is_none_or(|g| g.check(event, context))
    }
}

impl<S: Clone, E, C> Clone for Transition<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            destination: self.destination.clone(),
            guard: self.guard.clone(),
            action: self.action.clone(),
        }
    }
}

impl<S: fmt::Debug, E, C> fmt::Debug for Transition<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("source", &self.source)
            .field("destination", &self.destination)
            .field("guarded", &self.guard.is_some())
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

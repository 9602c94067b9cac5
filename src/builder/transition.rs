//! Options record describing one transition to register.

use crate::core::{Guard, State};
use crate::machine::BoxError;
use crate::structure::{Action, Destination, Transition};
use std::sync::Arc;

/// Destination, guard and action of a transition, all optional.
///
/// This is the single argument of
/// [`StructureBuilder::add_transition`](super::StructureBuilder::add_transition);
/// every combination of "event only", "event and destination", "event and
/// guard" and so on is just a different set of fields.
///
/// Without a destination the transition is reentrant: it exits and
/// re-enters its own source state.
///
/// # Example
///
/// ```rust
/// use treestate::builder::TransitionSpec;
///
/// struct Pump {
///     pressure: u32,
/// }
///
/// let spec: TransitionSpec<&str, &str, Pump> = TransitionSpec::new()
///     .to("Venting")
///     .when(|_event, pump: &Pump| pump.pressure > 100)
///     .action(|_state, _event, pump| {
///         pump.pressure = 0;
///         Ok(())
///     });
/// ```
pub struct TransitionSpec<S, E, C> {
    destination: Option<Destination<S>>,
    guard: Option<Guard<E, C>>,
    action: Option<Action<S, E, C>>,
}

impl<S: State, E, C> TransitionSpec<S, E, C> {
    /// Create an empty spec: reentrant, unguarded, no action.
    pub fn new() -> Self {
        Self {
            destination: None,
            guard: None,
            action: None,
        }
    }

    /// Set a fixed destination.
    pub fn to(mut self, state: S) -> Self {
        self.destination = Some(Destination::Fixed(state));
        self
    }

    /// Choose the destination when the transition fires.
    pub fn to_deferred<F>(mut self, supplier: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
    {
        self.destination = Some(Destination::Deferred(Arc::new(move || Ok(supplier()))));
        self
    }

    /// Choose the destination when the transition fires, allowing failure.
    ///
    /// A failing supplier aborts the dispatch before any action runs.
    pub fn try_to_deferred<F>(mut self, supplier: F) -> Self
    where
        F: Fn() -> Result<S, BoxError> + Send + Sync + 'static,
    {
        self.destination = Some(Destination::Deferred(Arc::new(supplier)));
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<E, C>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&E, &C) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Run `action` between the exit and entry actions (optional).
    ///
    /// The action receives the source state.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&S, &E, &mut C) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Bind to `source`, a missing destination meaning `source` itself.
    pub(crate) fn into_transition(self, source: S) -> Transition<S, E, C> {
        let destination = self
            .destination
            .unwrap_or_else(|| Destination::Fixed(source.clone()));
        Transition {
            source,
            destination,
            guard: self.guard,
            action: self.action,
        }
    }
}

impl<S: State, E, C> Default for TransitionSpec<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Idle,
        Running,
    }

    #[test]
    fn missing_destination_is_reentrant() {
        let transition = TransitionSpec::<TestState, (), ()>::new().into_transition(TestState::Idle);

        assert_eq!(transition.source, TestState::Idle);
        assert_eq!(transition.destination.fixed(), Some(&TestState::Idle));
        assert!(transition.guard.is_none());
        assert!(transition.action.is_none());
    }

    #[test]
    fn fluent_api_fills_every_field() {
        let transition = TransitionSpec::<TestState, (), u8>::new()
            .to(TestState::Running)
            .when(|_, fuel| *fuel > 0)
            .action(|_, _, fuel| {
                *fuel -= 1;
                Ok(())
            })
            .into_transition(TestState::Idle);

        assert_eq!(transition.destination.fixed(), Some(&TestState::Running));
        assert!(transition.is_enabled(&(), &1));
        assert!(!transition.is_enabled(&(), &0));

        let mut fuel = 2;
        let action = transition.action.unwrap();
        action(&TestState::Idle, &(), &mut fuel).unwrap();
        assert_eq!(fuel, 1);
    }

    #[test]
    fn deferred_destination_is_not_fixed() {
        let transition = TransitionSpec::<TestState, (), ()>::new()
            .to_deferred(|| TestState::Running)
            .into_transition(TestState::Idle);

        assert!(transition.destination.fixed().is_none());
        assert_eq!(transition.destination.resolve().unwrap(), TestState::Running);
    }

    #[test]
    fn later_destination_replaces_earlier() {
        let transition = TransitionSpec::<TestState, (), ()>::new()
            .try_to_deferred(|| Err("unreachable".into()))
            .to(TestState::Running)
            .into_transition(TestState::Idle);

        assert_eq!(transition.destination.fixed(), Some(&TestState::Running));
    }
}

//! Transition table: candidate transitions keyed by exact (state, event).
//!
//! The table knows nothing about the hierarchy. Falling back to ancestors
//! is the resolver's job.

use super::transition::Transition;
use crate::core::{Event, State};
use std::collections::HashMap;

pub struct TransitionTable<S, E, C> {
    slots: HashMap<S, HashMap<E, Vec<Transition<S, E, C>>>>,
}

impl<S: State, E: Event, C> Default for TransitionTable<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event, C> TransitionTable<S, E, C> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Append `transition` to the candidates for (`state`, `event`).
    ///
    /// The destination is not checked here; it may be deferred and unknown
    /// until firing.
    pub fn register(&mut self, state: S, event: E, transition: Transition<S, E, C>) {
        self.slots
            .entry(state)
            .or_default()
            .entry(event)
            .or_default()
            .push(transition);
    }

    /// Candidates declared for exactly this state, in declaration order.
    pub fn candidates_for(&self, state: &S, event: &E) -> &[Transition<S, E, C>] {
        self.slots
            .get(state)
            .and_then(|events| events.get(event))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Events that `state` itself declares transitions for.
    pub fn events_for<'a>(&'a self, state: &S) -> impl Iterator<Item = &'a E> + 'a {
        self.slots.get(state).into_iter().flat_map(HashMap::keys)
    }

    /// Every registered transition, grouped by slot.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &E, &Transition<S, E, C>)> + '_ {
        self.slots.iter().flat_map(|(state, events)| {
            events.iter().flat_map(move |(event, transitions)| {
                transitions.iter().map(move |t| (state, event, t))
            })
        })
    }

    /// Total number of registered transitions.
    pub fn len(&self) -> usize {
        self.slots
            .values()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Guard;
    use crate::structure::Destination;

    type TestTransition = Transition<&'static str, &'static str, ()>;

    fn to(source: &'static str, destination: &'static str) -> TestTransition {
        Transition {
            source,
            destination: Destination::Fixed(destination),
            guard: None,
            action: None,
        }
    }

    #[test]
    fn unregistered_slot_is_empty() {
        let table: TransitionTable<&str, &str, ()> = TransitionTable::new();
        assert!(table.candidates_for(&"Idle", &"start").is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn candidates_keep_declaration_order() {
        let mut table = TransitionTable::new();
        table.register("Idle", "start", to("Idle", "Running"));
        table.register("Idle", "start", to("Idle", "Paused"));

        let candidates = table.candidates_for(&"Idle", &"start");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].destination.fixed(), Some(&"Running"));
        assert_eq!(candidates[1].destination.fixed(), Some(&"Paused"));
    }

    #[test]
    fn lookup_is_exact_per_state_and_event() {
        let mut table = TransitionTable::new();
        table.register("Active", "stop", to("Active", "Idle"));

        assert_eq!(table.candidates_for(&"Active", &"stop").len(), 1);
        assert!(table.candidates_for(&"Running", &"stop").is_empty());
        assert!(table.candidates_for(&"Active", &"start").is_empty());
    }

    #[test]
    fn guarded_candidates_are_stored_unevaluated() {
        let mut table = TransitionTable::new();
        let mut guarded = to("Idle", "Running");
        guarded.guard = Some(Guard::new(|_: &&str, _: &()| false));
        table.register("Idle", "start", guarded);

        assert_eq!(table.candidates_for(&"Idle", &"start").len(), 1);
    }

    #[test]
    fn len_and_iter_cover_every_slot() {
        let mut table = TransitionTable::new();
        table.register("Idle", "start", to("Idle", "Running"));
        table.register("Running", "pause", to("Running", "Paused"));
        table.register("Running", "pause", to("Running", "Idle"));

        assert_eq!(table.len(), 3);
        assert_eq!(table.iter().count(), 3);
        let mut events: Vec<_> = table.events_for(&"Running").collect();
        events.sort();
        assert_eq!(events, vec![&"pause"]);
    }
}

//! Picks the transition, if any, that an event triggers.
//!
//! Resolution walks from the current state towards the root and stops at the
//! first state that declares any candidate for the event. That state owns the
//! event: its candidates are tried in declaration order and the first one
//! whose guard passes wins. If every guard rejects, nothing fires; ancestors
//! further up are never consulted.

use super::error::DispatchError;
use crate::core::{describe, Event, State};
use crate::structure::{Structure, Transition};
use tracing::trace;

/// A selected transition with its destination resolved.
#[derive(Debug)]
pub struct Resolution<'a, S, E, C> {
    /// The state whose candidates handled the event.
    pub owner: &'a S,
    pub transition: &'a Transition<S, E, C>,
    pub destination: S,
}

pub struct Resolver<'a, S, E, C> {
    structure: &'a Structure<S, E, C>,
}

impl<'a, S: State, E: Event, C> Resolver<'a, S, E, C> {
    pub fn new(structure: &'a Structure<S, E, C>) -> Self {
        Self { structure }
    }

    /// The innermost state at or above `current` declaring candidates for
    /// `event`, with those candidates.
    pub fn owner(&self, current: &S, event: &E) -> Option<(&'a S, &'a [Transition<S, E, C>])> {
        let structure = self.structure;
        structure.ancestors(current).find_map(|state| {
            let candidates = structure.candidates_for(state, event);
            (!candidates.is_empty()).then_some((state, candidates))
        })
    }

    /// Bubble and evaluate guards without resolving the destination.
    pub fn select(
        &self,
        current: &S,
        event: &E,
        context: &C,
    ) -> Option<(&'a S, &'a Transition<S, E, C>)> {
        let (owner, candidates) = self.owner(current, event)?;
        let selected = candidates.iter().find(|t| t.is_enabled(event, context));
        if selected.is_none() {
            trace!(owner = ?owner, event = ?event, "all guards rejected");
        }
        selected.map(|transition| (owner, transition))
    }

    /// Select a transition and resolve its destination.
    ///
    /// `Ok(None)` means no transition applies. A deferred destination that
    /// fails, or that names an unregistered state, is an error.
    pub fn resolve(
        &self,
        current: &S,
        event: &E,
        context: &C,
    ) -> Result<Option<Resolution<'a, S, E, C>>, DispatchError> {
        let Some((owner, transition)) = self.select(current, event, context) else {
            return Ok(None);
        };

        let destination =
            transition
                .destination
                .resolve()
                .map_err(|cause| DispatchError::DestinationUnresolved {
                    from: describe(owner),
                    source: cause,
                })?;

        if !self.structure.contains(&destination) {
            return Err(DispatchError::UnknownDestination {
                from: describe(owner),
                to: describe(&destination),
            });
        }

        Ok(Some(Resolution {
            owner,
            transition,
            destination,
        }))
    }
}

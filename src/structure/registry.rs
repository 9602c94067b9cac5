//! State registry: declared states and the parent links between them.

use crate::builder::BuildError;
use crate::core::{describe, State};
use std::collections::{HashMap, HashSet};

/// Declared states and their optional parents.
///
/// The registry only ever holds forests: a parent must be registered before
/// it can be assigned, and assignments that would close a loop are rejected,
/// so every ancestor chain is finite and ends at a root.
#[derive(Clone, Debug)]
pub struct StateRegistry<S> {
    parents: HashMap<S, Option<S>>,
    order: Vec<S>,
}

impl<S: State> Default for StateRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateRegistry<S> {
    pub fn new() -> Self {
        Self {
            parents: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register `state`, optionally under `parent`.
    ///
    /// Registering an already known state with `Some(parent)` moves it under
    /// the new parent; with `None` it is left where it is.
    pub fn add_state(&mut self, state: S, parent: Option<S>) -> Result<(), BuildError> {
        if let Some(parent) = &parent {
            if !self.contains(parent) {
                return Err(BuildError::InvalidParent {
                    state: describe(&state),
                    parent: describe(parent),
                });
            }
            if self.ancestors(parent).any(|s| *s == state) {
                return Err(BuildError::CyclicHierarchy {
                    state: describe(&state),
                    parent: describe(parent),
                });
            }
        }

        match self.parents.get_mut(&state) {
            Some(existing) => {
                if parent.is_some() {
                    *existing = parent;
                }
            }
            None => {
                self.order.push(state.clone());
                self.parents.insert(state, parent);
            }
        }
        Ok(())
    }

    /// Register `state` as a root unless it is already known.
    pub(crate) fn declare(&mut self, state: &S) {
        if !self.contains(state) {
            self.order.push(state.clone());
            self.parents.insert(state.clone(), None);
        }
    }

    pub fn contains(&self, state: &S) -> bool {
        self.parents.contains_key(state)
    }

    /// Parent of `state`, `None` for roots and unknown states.
    pub fn parent(&self, state: &S) -> Option<&S> {
        self.parents.get(state).and_then(Option::as_ref)
    }

    /// Walk from `state` up to its root, `state` first.
    ///
    /// Yields nothing for an unregistered state. The iterator is lazy and
    /// cheap to clone, and calling `ancestors` again restarts the walk.
    pub fn ancestors<'a>(&'a self, state: &S) -> Ancestors<'a, S> {
        Ancestors {
            registry: self,
            next: self.parents.get_key_value(state).map(|(key, _)| key),
        }
    }

    /// True if `ancestor` appears in `ancestors(state)`, including `state`
    /// itself.
    pub fn is_ancestor(&self, ancestor: &S, state: &S) -> bool {
        self.ancestors(state).any(|s| s == ancestor)
    }

    /// Deepest state that is an ancestor of both `a` and `b`.
    ///
    /// Returns `None` when the two states live in different trees or either
    /// one is unregistered.
    pub fn lca<'a>(&'a self, a: &S, b: &S) -> Option<&'a S> {
        let chain: HashSet<&S> = self.ancestors(a).collect();
        self.ancestors(b).find(|s| chain.contains(s))
    }

    /// Root of the tree containing `state`.
    pub fn root<'a>(&'a self, state: &S) -> Option<&'a S> {
        self.ancestors(state).last()
    }

    /// Nesting depth, `0` for roots.
    pub fn depth(&self, state: &S) -> Option<usize> {
        self.ancestors(state).count().checked_sub(1)
    }

    /// Registered states in declaration order.
    pub fn states(&self) -> impl ExactSizeIterator<Item = &S> + '_ {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Iterator over a state and its ancestors, innermost first.
#[derive(Clone, Debug)]
pub struct Ancestors<'a, S> {
    registry: &'a StateRegistry<S>,
    next: Option<&'a S>,
}

impl<'a, S: State> Iterator for Ancestors<'a, S> {
    type Item = &'a S;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.registry.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Root,
        Idle,
        Active,
        Running,
        Paused,
        Other,
    }

    use TestState::*;

    fn hierarchy() -> StateRegistry<TestState> {
        let mut registry = StateRegistry::new();
        registry.add_state(Root, None).unwrap();
        registry.add_state(Idle, Some(Root)).unwrap();
        registry.add_state(Active, Some(Root)).unwrap();
        registry.add_state(Running, Some(Active)).unwrap();
        registry.add_state(Paused, Some(Active)).unwrap();
        registry
    }

    #[test]
    fn ancestors_walk_to_root() {
        let registry = hierarchy();
        let chain: Vec<_> = registry.ancestors(&Running).collect();
        assert_eq!(chain, vec![&Running, &Active, &Root]);
    }

    #[test]
    fn ancestors_restart_on_each_call() {
        let registry = hierarchy();
        let first: Vec<_> = registry.ancestors(&Paused).collect();
        let second: Vec<_> = registry.ancestors(&Paused).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn ancestors_of_unknown_state_is_empty() {
        let registry = hierarchy();
        assert_eq!(registry.ancestors(&Other).count(), 0);
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let mut registry = StateRegistry::new();
        let result = registry.add_state(Idle, Some(Root));

        assert!(matches!(result, Err(BuildError::InvalidParent { .. })));
        assert!(!registry.contains(&Idle));
    }

    #[test]
    fn reparenting_under_descendant_is_cyclic() {
        let mut registry = hierarchy();
        let result = registry.add_state(Active, Some(Running));

        assert!(matches!(result, Err(BuildError::CyclicHierarchy { .. })));
        assert_eq!(registry.parent(&Active), Some(&Root));
    }

    #[test]
    fn self_parent_is_cyclic() {
        let mut registry = hierarchy();
        let result = registry.add_state(Idle, Some(Idle));

        assert!(matches!(result, Err(BuildError::CyclicHierarchy { .. })));
    }

    #[test]
    fn redeclaring_without_parent_keeps_parent() {
        let mut registry = hierarchy();
        registry.add_state(Running, None).unwrap();

        assert_eq!(registry.parent(&Running), Some(&Active));
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn reparenting_moves_state() {
        let mut registry = hierarchy();
        registry.add_state(Idle, Some(Active)).unwrap();

        assert_eq!(registry.parent(&Idle), Some(&Active));
        assert_eq!(registry.depth(&Idle), Some(2));
    }

    #[test]
    fn is_ancestor_includes_self() {
        let registry = hierarchy();
        assert!(registry.is_ancestor(&Running, &Running));
        assert!(registry.is_ancestor(&Active, &Running));
        assert!(registry.is_ancestor(&Root, &Paused));
        assert!(!registry.is_ancestor(&Running, &Active));
        assert!(!registry.is_ancestor(&Idle, &Running));
    }

    #[test]
    fn lca_finds_deepest_common_ancestor() {
        let registry = hierarchy();
        assert_eq!(registry.lca(&Running, &Paused), Some(&Active));
        assert_eq!(registry.lca(&Paused, &Idle), Some(&Root));
        assert_eq!(registry.lca(&Running, &Active), Some(&Active));
        assert_eq!(registry.lca(&Idle, &Idle), Some(&Idle));
    }

    #[test]
    fn lca_is_symmetric() {
        let registry = hierarchy();
        let states: Vec<_> = registry.states().cloned().collect();
        for a in &states {
            for b in &states {
                assert_eq!(registry.lca(a, b), registry.lca(b, a));
            }
        }
    }

    #[test]
    fn disjoint_trees_have_no_lca() {
        let mut registry = hierarchy();
        registry.add_state(Other, None).unwrap();

        assert_eq!(registry.lca(&Other, &Running), None);
        assert_eq!(registry.root(&Other), Some(&Other));
        assert_eq!(registry.root(&Running), Some(&Root));
    }

    #[test]
    fn states_keep_declaration_order() {
        let registry = hierarchy();
        let states: Vec<_> = registry.states().collect();
        assert_eq!(states, vec![&Root, &Idle, &Active, &Running, &Paused]);
    }
}

//! The live machine: current state, context, and event dispatch.

use super::error::{BoxError, DispatchError};
use super::listener::ListenerRegistry;
use super::options::MachineOptions;
use super::resolver::Resolver;
use crate::builder::BuildError;
use crate::core::{describe, Event, State, StateHistory, TransitionRecord};
use crate::structure::Structure;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, debug_span, trace, warn};
use uuid::Uuid;

/// States exited and entered by one transition.
///
/// `exit` runs innermost first, `entry` outermost first. Neither contains
/// the least common ancestor of source and destination, except for a
/// reentrant transition, which exits and re-enters its own state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPath<S> {
    pub exit: Vec<S>,
    pub entry: Vec<S>,
}

impl<S: State> TransitionPath<S> {
    pub fn between<E, C>(
        structure: &Structure<S, E, C>,
        source: &S,
        destination: &S,
    ) -> Result<Self, DispatchError>
    where
        E: Event,
    {
        if source == destination {
            return Ok(Self {
                exit: vec![source.clone()],
                entry: vec![destination.clone()],
            });
        }

        let lca = structure.lca(source, destination).ok_or_else(|| {
            DispatchError::DisjointHierarchy {
                from: describe(source),
                to: describe(destination),
            }
        })?;

        let exit = structure
            .ancestors(source)
            .take_while(|s| *s != lca)
            .cloned()
            .collect();
        let mut entry: Vec<S> = structure
            .ancestors(destination)
            .take_while(|s| *s != lca)
            .cloned()
            .collect();
        entry.reverse();

        Ok(Self { exit, entry })
    }
}

/// Clears the in-progress flag however the dispatch ends.
struct DispatchGuard<'a>(&'a Cell<bool>);

impl<'a> DispatchGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Result<Self, DispatchError> {
        if flag.replace(true) {
            return Err(DispatchError::ReentrantDispatch);
        }
        Ok(Self(flag))
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// A running hierarchical state machine.
///
/// The machine owns its context and shares its [`Structure`] read-only, so
/// any number of machines can run one structure. Calls take `&self`; the
/// machine may be put behind an `Rc` and reached from inside its own
/// actions, in which case `fire` and the context accessors return
/// [`DispatchError::ReentrantDispatch`] instead of running.
///
/// A machine is not `Sync`: callers on several threads must serialize
/// access themselves.
///
/// # Example
///
/// ```rust
/// use treestate::builder::{StructureBuilder, TransitionSpec};
/// use treestate::machine::Machine;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let structure = StructureBuilder::<&str, &str, Vec<String>>::new()
///     .state("Root")?
///     .child("Idle", "Root")?
///     .child("Active", "Root")?
///     .child("Running", "Active")?
///     .on_entry("Active", |s, _, log| {
///         log.push(format!("enter {s}"));
///         Ok(())
///     })
///     .on_entry("Running", |s, _, log| {
///         log.push(format!("enter {s}"));
///         Ok(())
///     })
///     .add_transition("Idle", "start", TransitionSpec::new().to("Running"))
///     .build()?;
///
/// let machine = Machine::new(structure, "Idle", Vec::new())?;
///
/// assert!(machine.fire(&"start")?);
/// assert_eq!(machine.current_state(), "Running");
/// assert!(!machine.fire(&"start")?);
///
/// let log = machine.into_context();
/// assert_eq!(log, vec!["enter Active", "enter Running"]);
/// # Ok(())
/// # }
/// ```
pub struct Machine<S, E, C> {
    id: Uuid,
    structure: Arc<Structure<S, E, C>>,
    current: RefCell<S>,
    context: RefCell<C>,
    listeners: ListenerRegistry<S, E>,
    history: RefCell<Option<StateHistory<S>>>,
    in_progress: Cell<bool>,
}

impl<S: State, E: Event, C> Machine<S, E, C> {
    /// Create a machine in `starting` with default options.
    pub fn new(
        structure: impl Into<Arc<Structure<S, E, C>>>,
        starting: S,
        context: C,
    ) -> Result<Self, BuildError> {
        Self::with_options(structure, starting, context, MachineOptions::default())
    }

    /// Create a machine in `starting`.
    ///
    /// Fails if `starting` is not part of the structure. No entry actions
    /// run: the machine is considered to already be in `starting`.
    pub fn with_options(
        structure: impl Into<Arc<Structure<S, E, C>>>,
        starting: S,
        context: C,
        options: MachineOptions,
    ) -> Result<Self, BuildError> {
        let structure = structure.into();
        if !structure.contains(&starting) {
            return Err(BuildError::UnknownStartingState(describe(&starting)));
        }

        let id = Uuid::new_v4();
        debug!(machine = %id, starting = ?starting, "machine created");

        Ok(Self {
            id,
            structure,
            current: RefCell::new(starting),
            context: RefCell::new(context),
            listeners: ListenerRegistry::new(),
            history: RefCell::new(options.history.new_history()),
            in_progress: Cell::new(false),
        })
    }

    /// Identity used to tell machines apart in logs.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn structure(&self) -> &Arc<Structure<S, E, C>> {
        &self.structure
    }

    /// The state committed by the last successful dispatch.
    pub fn current_state(&self) -> S {
        self.current.borrow().clone()
    }

    /// True if the current state is `state` or one of its descendants.
    pub fn is_in(&self, state: &S) -> bool {
        self.structure.is_ancestor(state, &self.current.borrow())
    }

    /// Register a listener called after every committed transition.
    pub fn add_listener<F>(&self, listener: F)
    where
        F: Fn(&E, &TransitionRecord<S>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.listeners.add(Arc::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Snapshot of the retained history, `None` when history is disabled.
    pub fn history(&self) -> Option<StateHistory<S>> {
        self.history.borrow().clone()
    }

    /// Read the context.
    pub fn with_context<R>(&self, f: impl FnOnce(&C) -> R) -> Result<R, DispatchError> {
        let _dispatch = DispatchGuard::acquire(&self.in_progress)?;
        let context = self.context.borrow();
        Ok(f(&*context))
    }

    /// Modify the context between dispatches.
    pub fn with_context_mut<R>(&self, f: impl FnOnce(&mut C) -> R) -> Result<R, DispatchError> {
        let _dispatch = DispatchGuard::acquire(&self.in_progress)?;
        let mut context = self.context.borrow_mut();
        Ok(f(&mut *context))
    }

    /// Consume the machine and return its context.
    pub fn into_context(self) -> C {
        self.context.into_inner()
    }

    /// True if firing `event` now would select a transition.
    ///
    /// Only bubbling and guards are evaluated: deferred destinations and
    /// actions do not run, so a `true` answer can still end in an error
    /// from `fire`.
    pub fn can_fire(&self, event: &E) -> Result<bool, DispatchError> {
        let _dispatch = DispatchGuard::acquire(&self.in_progress)?;
        let structure: &Structure<S, E, C> = &self.structure;
        let current = self.current.borrow();
        let context = self.context.borrow();
        Ok(Resolver::new(structure)
            .select(&*current, event, &*context)
            .is_some())
    }

    /// Dispatch `event`.
    ///
    /// Returns `Ok(false)` when no transition applies; nothing runs and
    /// nothing changes. Otherwise runs, in order: exit actions from the
    /// current state up to (excluding) the least common ancestor, the
    /// transition action, the commit of the new current state, entry
    /// actions from below the least common ancestor down to the destination,
    /// and finally every listener. Returns `Ok(true)` when all of that
    /// succeeded.
    ///
    /// A failing exit or transition action aborts before the commit. A
    /// failing entry action or listener is reported after the commit; see
    /// [`DispatchError::is_committed`].
    pub fn fire(&self, event: &E) -> Result<bool, DispatchError> {
        let _dispatch = DispatchGuard::acquire(&self.in_progress)?;
        let _span = debug_span!("fire", machine = %self.id, event = ?event).entered();

        let structure: &Structure<S, E, C> = &self.structure;
        let source = self.current_state();
        let mut context = self.context.borrow_mut();

        let Some(resolution) = Resolver::new(structure).resolve(&source, event, &*context)? else {
            trace!(state = ?source, "no transition");
            return Ok(false);
        };
        let destination = resolution.destination;
        let path = TransitionPath::between(structure, &source, &destination)?;
        debug!(
            from = ?source,
            to = ?destination,
            owner = ?resolution.owner,
            "transition resolved"
        );

        for state in &path.exit {
            trace!(state = ?state, "exit");
            for action in structure.exit_actions(state) {
                action(state, event, &mut *context).map_err(|cause| DispatchError::ExitAction {
                    state: describe(state),
                    source: cause,
                })?;
            }
        }

        if let Some(action) = &resolution.transition.action {
            action(&source, event, &mut *context).map_err(|cause| {
                DispatchError::TransitionAction {
                    from: describe(&source),
                    to: describe(&destination),
                    source: cause,
                }
            })?;
        }

        *self.current.borrow_mut() = destination.clone();
        let record = TransitionRecord::new(source, destination);
        if let Some(history) = self.history.borrow_mut().as_mut() {
            history.record(record.clone());
        }

        for state in &path.entry {
            trace!(state = ?state, "entry");
            for action in structure.entry_actions(state) {
                action(state, event, &mut *context).map_err(|cause| {
                    warn!(state = ?state, error = %cause, "entry action failed after commit");
                    DispatchError::IncompleteEntry {
                        destination: describe(&record.destination),
                        state: describe(state),
                        source: cause,
                    }
                })?;
            }
        }
        drop(context);

        self.listeners.notify(event, &record)?;
        debug!(state = ?record.destination, "transition committed");
        Ok(true)
    }
}

impl<S: fmt::Debug, E, C> fmt::Debug for Machine<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .field("in_progress", &self.in_progress.get())
            .finish_non_exhaustive()
    }
}

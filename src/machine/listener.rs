//! Observers notified after each committed transition.

use super::error::{BoxError, DispatchError};
use crate::core::TransitionRecord;
use std::cell::RefCell;
use std::sync::Arc;
use tracing::warn;

/// Function called with the triggering event and the committed transition.
pub type Listener<S, E> = Arc<dyn Fn(&E, &TransitionRecord<S>) -> Result<(), BoxError> + Send + Sync>;

/// Ordered, append-only collection of listeners.
pub struct ListenerRegistry<S, E> {
    listeners: RefCell<Vec<Listener<S, E>>>,
}

impl<S, E> Default for ListenerRegistry<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, E> ListenerRegistry<S, E> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Append a listener. It is called after every later commit.
    pub fn add(&self, listener: Listener<S, E>) {
        self.listeners.borrow_mut().push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Call every listener in registration order.
    ///
    /// Stops at the first failure and returns it; listeners before it have
    /// already run, listeners after it are skipped. Listeners added while
    /// notifying are first called on the next commit.
    pub(crate) fn notify(&self, event: &E, record: &TransitionRecord<S>) -> Result<(), DispatchError> {
        let snapshot: Vec<Listener<S, E>> = self.listeners.borrow().clone();
        for (index, listener) in snapshot.iter().enumerate() {
            listener(event, record).map_err(|cause| {
                warn!(index, error = %cause, "listener failed after commit");
                DispatchError::Listener {
                    index,
                    source: cause,
                }
            })?;
        }
        Ok(())
    }
}

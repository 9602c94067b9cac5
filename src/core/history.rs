//! Committed transition records and the history that retains them.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed transition.
///
/// This is what listeners receive after every successful dispatch, and what
/// the machine history retains.
///
/// # Example
///
/// ```rust
/// use treestate::core::TransitionRecord;
///
/// let record = TransitionRecord::new("Idle", "Running");
/// assert_eq!(record.source, "Idle");
/// assert_eq!(record.destination, "Running");
/// assert!(!record.is_reentrant());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord<S> {
    /// The state the machine was in before the transition
    pub source: S,
    /// The state the machine committed to
    pub destination: S,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

impl<S: State> TransitionRecord<S> {
    /// Create a record stamped with the current time.
    pub fn new(source: S, destination: S) -> Self {
        Self {
            source,
            destination,
            timestamp: Utc::now(),
        }
    }

    /// True when the transition exited and re-entered the same state.
    pub fn is_reentrant(&self) -> bool {
        self.source == self.destination
    }
}

/// Ordered history of committed transitions.
///
/// A history is either unbounded or keeps only the most recent `limit`
/// records, dropping the oldest first. The limit also applies when a history
/// is deserialized: surplus records are dropped oldest first.
///
/// # Example
///
/// ```rust
/// use treestate::core::{StateHistory, TransitionRecord};
///
/// let mut history = StateHistory::bounded(2);
/// history.record(TransitionRecord::new("A", "B"));
/// history.record(TransitionRecord::new("B", "C"));
/// history.record(TransitionRecord::new("C", "D"));
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.get_path(), vec![&"B", &"C", &"D"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "HistoryRepr<S>")]
pub struct StateHistory<S> {
    records: VecDeque<TransitionRecord<S>>,
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct HistoryRepr<S> {
    records: VecDeque<TransitionRecord<S>>,
    limit: Option<usize>,
}

impl<S> From<HistoryRepr<S>> for StateHistory<S> {
    fn from(repr: HistoryRepr<S>) -> Self {
        let mut records = repr.records;
        if let Some(limit) = repr.limit {
            let surplus = records.len().saturating_sub(limit);
            records.drain(..surplus);
        }
        Self {
            records,
            limit: repr.limit,
        }
    }
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self {
            records: VecDeque::new(),
            limit: None,
        }
    }

    /// Create an empty history that retains at most `limit` records.
    pub fn bounded(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit: Some(limit),
        }
    }

    /// Append a record, evicting the oldest one if the history is full.
    pub fn record(&mut self, record: TransitionRecord<S>) {
        if self.limit == Some(0) {
            return;
        }
        if let Some(limit) = self.limit {
            while self.records.len() >= limit {
                self.records.pop_front();
            }
        }
        self.records.push_back(record);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the source of the oldest retained record followed by the
    /// destination of every retained record.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(&first.source);
        }
        path.extend(self.records.iter().map(|r| &r.destination));
        path
    }

    /// Time elapsed between the oldest and newest retained records.
    ///
    /// Returns `None` if the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Iterate over retained records, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TransitionRecord<S>> + '_ {
        self.records.iter()
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of retained records, `None` when unbounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

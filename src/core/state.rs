//! Identity traits for states and events.
//!
//! States and events are opaque, caller-supplied identifiers. The engine only
//! needs to hash them, compare them, clone them into records and print them
//! in diagnostics, so both traits are blanket-implemented for every type that
//! can do that.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state identifiers.
///
/// Any `Clone + Eq + Hash + Debug` type is a state. Enums are the usual
/// choice, but strings and integers work just as well.
///
/// # Example
///
/// ```rust
/// use treestate::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// fn assert_state<S: State>(_: &S) {}
///
/// assert_state(&Door::Open);
/// assert_state(&"Closed");
/// assert_state(&42u32);
/// ```
pub trait State: Clone + Eq + Hash + Debug {}

impl<T> State for T where T: Clone + Eq + Hash + Debug {}

/// Trait for event identifiers.
///
/// Events are pure lookup keys and carry no payload. Data that accompanies
/// an event travels through the machine's context instead.
pub trait Event: Clone + Eq + Hash + Debug {}

impl<T> Event for T where T: Clone + Eq + Hash + Debug {}

/// Render an identifier for error messages and log fields.
pub(crate) fn describe<T: Debug + ?Sized>(value: &T) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Idle,
        Running,
    }

    fn is_state<S: State>(_: &S) -> bool {
        true
    }

    fn is_event<E: Event>(_: &E) -> bool {
        true
    }

    #[test]
    fn enums_strings_and_integers_are_states() {
        assert!(is_state(&TestState::Idle));
        assert!(is_state(&"idle"));
        assert!(is_state(&String::from("idle")));
        assert!(is_state(&7u8));
    }

    #[test]
    fn events_share_the_same_bounds() {
        assert!(is_event(&"start"));
        assert!(is_event(&TestState::Running));
    }

    #[test]
    fn describe_uses_debug_form() {
        assert_eq!(describe(&TestState::Running), "Running");
        assert_eq!(describe("start"), "\"start\"");
    }
}

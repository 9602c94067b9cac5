//! Guard predicates for choosing between candidate transitions.
//!
//! Guards are pure boolean functions over the incoming event and the
//! machine context. When several transitions are declared for the same
//! state and event, the first one whose guard passes is taken.

use std::fmt;
use std::sync::Arc;

/// Pure predicate that decides whether a candidate transition may be taken.
///
/// # Example
///
/// ```rust
/// use treestate::core::Guard;
///
/// struct Thermostat {
///     celsius: i32,
/// }
///
/// let too_hot = Guard::new(|_event: &&str, ctx: &Thermostat| ctx.celsius > 30);
///
/// assert!(too_hot.check(&"tick", &Thermostat { celsius: 35 }));
/// assert!(!too_hot.check(&"tick", &Thermostat { celsius: 20 }));
/// ```
pub struct Guard<E, C> {
    predicate: Arc<dyn Fn(&E, &C) -> bool + Send + Sync>,
}

impl<E, C> Guard<E, C> {
    /// Create a guard from a predicate over the event and context.
    ///
    /// The predicate must be deterministic and free of side effects: it may
    /// be evaluated by probes such as `Machine::can_fire` as well as by
    /// dispatch.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&E, &C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard.
    pub fn check(&self, event: &E, context: &C) -> bool {
        (self.predicate)(event, context)
    }
}

impl<E, C> Clone for Guard<E, C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<E, C> fmt::Debug for Guard<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum TestEvent {
        Coin,
        Push,
    }

    struct Turnstile {
        credits: u32,
    }

    #[test]
    fn guard_reads_context() {
        let has_credit = Guard::new(|_: &TestEvent, ctx: &Turnstile| ctx.credits > 0);

        assert!(has_credit.check(&TestEvent::Push, &Turnstile { credits: 1 }));
        assert!(!has_credit.check(&TestEvent::Push, &Turnstile { credits: 0 }));
    }

    #[test]
    fn guard_reads_event() {
        let only_coins = Guard::new(|e: &TestEvent, _: &Turnstile| *e == TestEvent::Coin);
        let ctx = Turnstile { credits: 0 };

        assert!(only_coins.check(&TestEvent::Coin, &ctx));
        assert!(!only_coins.check(&TestEvent::Push, &ctx));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::new(|_: &TestEvent, ctx: &Turnstile| ctx.credits % 2 == 0);
        let ctx = Turnstile { credits: 4 };

        let first = guard.check(&TestEvent::Coin, &ctx);
        let second = guard.check(&TestEvent::Coin, &ctx);

        assert_eq!(first, second);
    }

    #[test]
    fn cloned_guard_shares_predicate() {
        let guard = Guard::new(|_: &TestEvent, ctx: &Turnstile| ctx.credits > 2);
        let cloned = guard.clone();
        let ctx = Turnstile { credits: 3 };

        assert_eq!(guard.check(&TestEvent::Coin, &ctx), cloned.check(&TestEvent::Coin, &ctx));
    }
}

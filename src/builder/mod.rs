//! Builder API for declaring machine structures.
//!
//! Every way of declaring a transition reduces to one call,
//! [`StructureBuilder::add_transition`], taking a [`TransitionSpec`] whose
//! fields are all optional. The helpers below cover the two most common
//! shapes.

pub mod error;
pub mod structure;
pub mod transition;

pub use error::BuildError;
pub use structure::StructureBuilder;
pub use transition::TransitionSpec;

use crate::core::State;

/// Spec for an unconditional transition to `destination`.
///
/// # Example
///
/// ```
/// use treestate::builder::{transition_to, StructureBuilder};
///
/// let structure = StructureBuilder::<&str, &str, ()>::new()
///     .state("Off")
///     .and_then(|b| b.state("On"))
///     .map(|b| b.add_transition("Off", "flip", transition_to("On")));
/// ```
pub fn transition_to<S, E, C>(destination: S) -> TransitionSpec<S, E, C>
where
    S: State,
{
    TransitionSpec::new().to(destination)
}

/// Spec for a transition to `destination` taken only when `guard` passes.
///
/// # Example
///
/// ```
/// use treestate::builder::guarded_transition_to;
/// use treestate::builder::TransitionSpec;
///
/// struct Tank {
///     litres: u32,
/// }
///
/// let spec: TransitionSpec<&str, &str, Tank> =
///     guarded_transition_to("Empty", |_event, tank: &Tank| tank.litres == 0);
/// ```
pub fn guarded_transition_to<S, E, C, F>(destination: S, guard: F) -> TransitionSpec<S, E, C>
where
    S: State,
    F: Fn(&E, &C) -> bool + Send + Sync + 'static,
{
    TransitionSpec::new().to(destination).when(guard)
}

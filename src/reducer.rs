//! The reducer combining previous state with an [`Update`].

use crate::Update;

/// Reduce a previous state value and an update to the next state value.
///
/// - [`Update::Literal`] replaces `previous` entirely; nothing is merged.
/// - [`Update::Updater`] is called with `previous` and its result is returned.
///
/// This is the only place state transitions are computed. It is total and has
/// no side effects of its own, though an updater closure is free to.
///
/// # Example
///
/// ```rust
/// use oxide_hooks::{reduce, Update};
///
/// assert_eq!(reduce(1, Update::literal(5)), 5);
/// assert_eq!(reduce(1, Update::updater(|count: i32| count * 10)), 10);
/// ```
pub fn reduce<T>(previous: T, update: Update<T>) -> T {
    match update {
        Update::Literal(value) => value,
        Update::Updater(f) => f(previous),
    }
}

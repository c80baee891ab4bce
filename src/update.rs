//! Tagged state updates handed to a [`SetState`](crate::SetState).

#[cfg(feature = "no_std")]
use alloc::boxed::Box;

use core::fmt;

/// An update to a piece of hook state.
///
/// An update either replaces the previous value outright ([`Update::Literal`])
/// or derives the next value from it ([`Update::Updater`]). The variant is
/// chosen explicitly, so a state type that is itself callable is never
/// mistaken for an updater.
///
/// # Example
///
/// ```rust
/// use oxide_hooks::Update;
///
/// // Replace the previous value
/// let update = Update::literal(5);
/// assert_eq!(update.apply(1), 5);
///
/// // Derive the next value from the previous one
/// let update = Update::updater(|count: i32| count + 1);
/// assert_eq!(update.apply(1), 2);
///
/// // Plain values convert into literals
/// let update: Update<i32> = 7.into();
/// assert_eq!(update.apply(0), 7);
/// ```
pub enum Update<T> {
    /// Replace the previous value entirely.
    Literal(T),
    /// Compute the next value from the previous one.
    #[allow(clippy::type_complexity)]
    Updater(Box<dyn FnOnce(T) -> T + Send>),
}

impl<T> Update<T> {
    /// Create an update that replaces the previous value.
    pub fn literal(value: T) -> Self {
        Update::Literal(value)
    }

    /// Create an update that derives the next value from the previous one.
    pub fn updater<F>(f: F) -> Self
    where
        F: FnOnce(T) -> T + Send + 'static,
    {
        Update::Updater(Box::new(f))
    }

    /// Apply this update to `previous`.
    ///
    /// Equivalent to [`reduce(previous, self)`](crate::reduce).
    pub fn apply(self, previous: T) -> T {
        crate::reduce(previous, self)
    }
}

impl<T> From<T> for Update<T> {
    fn from(value: T) -> Self {
        Update::Literal(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Update::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Update::Updater(_) => f.write_str("Updater(..)"),
        }
    }
}

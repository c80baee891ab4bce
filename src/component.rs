//! The handle contract for values returned by components.

#[cfg(any(test, feature = "testing"))]
#[cfg(feature = "no_std")]
use alloc::vec::Vec;

#[cfg(any(test, feature = "testing"))]
use portable_atomic_util::Arc;
#[cfg(any(test, feature = "testing"))]
use spin::Mutex;

use crate::HookError;

/// Handle returned by a component function.
///
/// The dispatcher calls [`render`](Self::render) once per render cycle, right
/// after the component returns. Handles usually carry the state read during
/// that render plus [`SetState`](crate::SetState) clones, and expose their own
/// methods (a `click`, say) that queue updates for the next render.
///
/// `E` is the component's error type. It defaults to [`HookError`] for
/// components with no failure modes of their own.
///
/// # Example
///
/// ```rust
/// use oxide_hooks::{ComponentHandle, HookError, SetState};
///
/// struct Counter {
///     count: i32,
///     set_count: SetState<i32>,
/// }
///
/// impl ComponentHandle for Counter {
///     fn render(&self) -> Result<(), HookError> {
///         println!("{}", self.count);
///         Ok(())
///     }
/// }
///
/// impl Counter {
///     fn click(&self) {
///         self.set_count.set(self.count + 1);
///     }
/// }
/// ```
pub trait ComponentHandle<E = HookError> {
    /// Perform this handle's rendering side effect.
    ///
    /// Errors are returned unchanged from [`Dispatcher::render`](crate::Dispatcher::render).
    fn render(&self) -> Result<(), E>;
}

#[cfg(any(test, feature = "testing"))]
/// Shared log of values emitted by handle render effects.
///
/// Only available with the `testing` feature.
///
/// Clone it into a component so its handles can [`record`](Self::record)
/// what they render, then assert on the log from the test.
///
/// # Example
///
/// ```rust
/// use oxide_hooks::{ComponentHandle, Dispatcher, HookError, Hooks, RenderLog};
///
/// struct Label {
///     text: &'static str,
///     log: RenderLog<&'static str>,
/// }
///
/// impl ComponentHandle for Label {
///     fn render(&self) -> Result<(), HookError> {
///         self.log.record(self.text);
///         Ok(())
///     }
/// }
///
/// let log = RenderLog::new();
/// let label = {
///     let log = log.clone();
///     move |hooks: &mut Hooks| -> Result<Label, HookError> {
///         let (text, _) = hooks.use_state("hello")?;
///         Ok(Label { text, log: log.clone() })
///     }
/// };
///
/// let mut dispatcher = Dispatcher::new();
/// dispatcher.render(&label)?;
///
/// log.with_renders(|renders| assert_eq!(renders, &["hello"]));
/// # Ok::<(), HookError>(())
/// ```
pub struct RenderLog<T> {
    renders: Arc<Mutex<Vec<T>>>,
}

#[cfg(any(test, feature = "testing"))]
impl<T> Clone for RenderLog<T> {
    fn clone(&self) -> Self {
        Self {
            renders: self.renders.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl<T> Default for RenderLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl<T> RenderLog<T> {
    pub fn new() -> Self {
        Self {
            renders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Append a rendered value.
    pub fn record(&self, value: T) {
        self.renders.lock().push(value);
    }

    /// Get the number of renders recorded so far.
    pub fn count(&self) -> usize {
        self.renders.lock().len()
    }

    /// Access the recorded values with a closure.
    pub fn with_renders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Vec<T>) -> R,
    {
        let renders = self.renders.lock();
        f(&renders)
    }
}

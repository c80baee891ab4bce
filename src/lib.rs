#![cfg_attr(feature = "no_std", no_std)]

//! A minimal hook-style state runtime for Rust with `no_std` support.
//!
//! Component functions hold no memory of their own. They read persistent
//! state through [`Hooks::use_state`], return a handle exposing a render
//! effect, and queue updates through the [`SetState`] they were given. A
//! [`Dispatcher`] owns the state and drives each render cycle.
//!
//! ## Example
//!
//! ```rust
//! use oxide_hooks::{ComponentHandle, Dispatcher, HookError, Hooks, SetState};
//!
//! struct App {
//!     count: i32,
//!     set_count: SetState<i32>,
//! }
//!
//! impl ComponentHandle for App {
//!     fn render(&self) -> Result<(), HookError> {
//!         println!("{}", self.count);
//!         Ok(())
//!     }
//! }
//!
//! impl App {
//!     fn click(&self) {
//!         self.set_count.set(self.count + 1);
//!     }
//! }
//!
//! fn app(hooks: &mut Hooks) -> Result<App, HookError> {
//!     let (count, set_count) = hooks.use_state(1)?;
//!     Ok(App { count, set_count })
//! }
//!
//! let mut dispatcher = Dispatcher::new();
//!
//! // Mount: prints 1
//! let handle = dispatcher.render(&app)?;
//! assert_eq!(handle.count, 1);
//!
//! // Click, then re-render: prints 2
//! handle.click();
//! let handle = dispatcher.render(&app)?;
//! assert_eq!(handle.count, 2);
//!
//! // And again: prints 3
//! handle.click();
//! let handle = dispatcher.render(&app)?;
//! assert_eq!(handle.count, 3);
//! # Ok::<(), HookError>(())
//! ```

#[cfg(feature = "no_std")]
extern crate alloc;

// Module declarations
mod component;
mod dispatcher;
mod error;
mod hooks;
mod reducer;
mod setter;
mod store;
mod update;

// Public re-exports
pub use component::ComponentHandle;
pub use dispatcher::{render, Dispatch, Dispatcher};
pub use error::{HookError, Violation};
pub use hooks::{use_state, Hooks};
pub use reducer::reduce;
pub use setter::SetState;
pub use store::{ComponentId, StateStore};
pub use update::Update;

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use component::RenderLog;

//! Errors raised by the hook dispatcher.

/// How a render's hook calls diverged from the layout committed for its component.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// The slot was claimed with a different state type than on earlier renders.
    #[error("slot type changed from `{expected}` to `{found}`")]
    TypeChanged {
        expected: &'static str,
        found: &'static str,
    },
    /// More hooks were called than on earlier renders.
    #[error("hook called past the {expected} slot(s) committed on an earlier render")]
    ExtraHook { expected: usize },
    /// Fewer hooks were called than on earlier renders.
    #[error("render called {found} hook(s) but {expected} are committed")]
    MissingHook { expected: usize, found: usize },
}

/// Errors produced by the dispatcher itself.
///
/// Component errors are the component's own type; the dispatcher converts
/// `HookError` into it, which is why components require `E: From<HookError>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    /// Hook count or slot types are not stable across renders of one component.
    #[error("hook order violation in `{component}` at slot {slot}: {violation}")]
    HookOrderViolation {
        component: &'static str,
        slot: usize,
        violation: Violation,
    },
}

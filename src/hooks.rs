//! The render context handed to component functions.

use portable_atomic_util::Arc;
use spin::Mutex;

use crate::setter::UpdateQueue;
use crate::store::{ComponentId, SlotKey, StateStore};
use crate::{HookError, SetState};

/// Hook context for a single render of a single component.
///
/// A fresh `Hooks` is created by the dispatcher for every render and passed
/// to the component function. Hooks are assigned slots by call order, so a
/// component must call the same hooks, with the same state types, in the same
/// order on every render. Diverging fails the render with
/// [`HookError::HookOrderViolation`].
pub struct Hooks {
    store: Arc<Mutex<StateStore>>,
    queue: UpdateQueue,
    component: ComponentId,
    generation: u64,
    cursor: usize,
    violation: Option<HookError>,
}

impl Hooks {
    pub(crate) fn begin(
        store: Arc<Mutex<StateStore>>,
        queue: UpdateQueue,
        component: ComponentId,
    ) -> Self {
        let generation = store.lock().begin(component);

        Self {
            store,
            queue,
            component,
            generation,
            cursor: 0,
            violation: None,
        }
    }

    /// Read the state held in this call position's slot.
    ///
    /// Returns the stored value, or `initial` when no update has been applied
    /// to the slot yet, together with a [`SetState`] for the slot. Updates
    /// queued before this call are applied first, so the returned value
    /// reflects all of them.
    ///
    /// `initial` is never written to the slot. Until the first update lands,
    /// every call falls back to its own `initial`.
    ///
    /// # Errors
    ///
    /// [`HookError::HookOrderViolation`] if this slot held a different state
    /// type on an earlier render, or if earlier renders called fewer hooks.
    /// The violation is also reported by the enclosing render, even when the
    /// component discards this error.
    pub fn use_state<T>(&mut self, initial: T) -> Result<(T, SetState<T>), HookError>
    where
        T: Clone + Send + 'static,
    {
        let key = SlotKey {
            component: self.component,
            generation: self.generation,
            index: self.cursor,
        };
        self.cursor += 1;

        let claimed = {
            let mut store = self.store.lock();
            self.queue.drain_into(&mut store);
            store.claim::<T>(key)
        };

        match claimed {
            Ok(stored) => {
                let current = stored.unwrap_or_else(|| initial.clone());
                Ok((current, SetState::new(key, initial, self.queue.sender())))
            }
            Err(violation) => {
                let error = HookError::HookOrderViolation {
                    component: self.component.name(),
                    slot: key.index,
                    violation,
                };
                if self.violation.is_none() {
                    self.violation = Some(error.clone());
                }
                Err(error)
            }
        }
    }

    /// Identity of the component being rendered.
    pub fn component(&self) -> ComponentId {
        self.component
    }

    /// Number of hooks called so far in this render.
    pub fn hook_count(&self) -> usize {
        self.cursor
    }

    pub(crate) fn validate(&self) -> Result<(), HookError> {
        if let Some(error) = &self.violation {
            return Err(error.clone());
        }

        self.store
            .lock()
            .validate(self.component, self.cursor)
            .map_err(|violation| HookError::HookOrderViolation {
                component: self.component.name(),
                slot: self.cursor,
                violation,
            })
    }

    pub(crate) fn commit(self) {
        self.store.lock().commit(self.component);
    }

    pub(crate) fn rollback(self) {
        self.store.lock().rollback(self.component);
    }
}

/// Hook facade: read state through the render context passed to a component.
///
/// Forwards to [`Hooks::use_state`].
pub fn use_state<T>(hooks: &mut Hooks, initial: T) -> Result<(T, SetState<T>), HookError>
where
    T: Clone + Send + 'static,
{
    hooks.use_state(initial)
}

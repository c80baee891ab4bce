//! The dispatcher that owns hook state and drives the render cycle.

use portable_atomic_util::Arc;
use spin::Mutex;

use crate::setter::UpdateQueue;
use crate::store::{ComponentId, StateStore};
use crate::{ComponentHandle, HookError, Hooks};

/// A dispatcher capable of running render cycles.
///
/// Host code that should work with any dispatcher takes `&mut impl Dispatch`
/// and calls [`render`](crate::render) on it. [`Dispatcher`] is the provided
/// implementation; wrappers (for instrumentation, say) implement this trait
/// and forward to it.
pub trait Dispatch {
    /// Run one render cycle of `component`.
    ///
    /// See [`Dispatcher::render`] for the contract implementations follow.
    fn render<C, H, E>(&mut self, component: &C) -> Result<H, E>
    where
        C: Fn(&mut Hooks) -> Result<H, E> + 'static,
        H: ComponentHandle<E>,
        E: From<HookError>;
}

/// Owns a [`StateStore`] and runs render cycles against it.
///
/// The dispatcher is the only owner of hook state. A host keeps one
/// dispatcher per independent application; dispatchers never share state.
///
/// A render cycle:
/// 1. Invokes the component with a fresh [`Hooks`] context
/// 2. Checks the hooks it called against the component's committed layout
/// 3. Invokes the returned handle's [`ComponentHandle::render`]
/// 4. Commits the hook layout and returns the handle
///
/// Updates issued through [`SetState`](crate::SetState) are queued and applied
/// in issue order before the next state read.
///
/// See the [crate-level documentation](crate) for a complete example.
pub struct Dispatcher {
    store: Arc<Mutex<StateStore>>,
    queue: UpdateQueue,
}

impl Dispatcher {
    /// Create a dispatcher with an empty store.
    pub fn new() -> Self {
        Self::from_store(StateStore::new())
    }

    /// Create a dispatcher that takes ownership of an existing store.
    pub fn from_store(store: StateStore) -> Self {
        Dispatcher {
            store: Arc::new(Mutex::new(store)),
            queue: UpdateQueue::new(),
        }
    }

    /// Run one render cycle of `component` and return its handle.
    ///
    /// - The component is invoked synchronously; its error is returned unchanged.
    /// - The hooks it called must match the count and types committed by
    ///   earlier renders, otherwise [`HookError::HookOrderViolation`] is
    ///   returned (converted into `E`).
    /// - The handle's render effect is invoked; its error is returned unchanged.
    ///
    /// Every call re-invokes the component, so the returned handle is always
    /// fresh. A failed render leaves stored values as they were and discards
    /// the hook layout if this was the component's first render.
    ///
    /// # Errors
    ///
    /// Whatever the component or its handle's render effect returns, or a
    /// hook order violation.
    pub fn render<C, H, E>(&mut self, component: &C) -> Result<H, E>
    where
        C: Fn(&mut Hooks) -> Result<H, E> + 'static,
        H: ComponentHandle<E>,
        E: From<HookError>,
    {
        self.render_as(ComponentId::of::<C>(), component)
    }

    /// Run one render cycle of `component` under an explicit `key`.
    ///
    /// Same contract as [`render`](Self::render), but the component's identity
    /// is its type together with `key`. Use this for type-erased components
    /// (`fn` pointers, `Box<dyn Fn(&mut Hooks) -> ...>`), whose type alone
    /// cannot tell them apart.
    ///
    /// # Example
    ///
    /// ```rust
    /// use oxide_hooks::{ComponentHandle, Dispatcher, HookError, Hooks, SetState};
    ///
    /// struct Count(i32, SetState<i32>);
    ///
    /// impl ComponentHandle for Count {
    ///     fn render(&self) -> Result<(), HookError> {
    ///         Ok(())
    ///     }
    /// }
    ///
    /// fn starting_at(initial: i32) -> Box<dyn Fn(&mut Hooks) -> Result<Count, HookError>> {
    ///     Box::new(move |hooks: &mut Hooks| -> Result<Count, HookError> {
    ///         let (count, set_count) = hooks.use_state(initial)?;
    ///         Ok(Count(count, set_count))
    ///     })
    /// }
    ///
    /// let components = vec![starting_at(1), starting_at(100)];
    /// let mut dispatcher = Dispatcher::new();
    ///
    /// dispatcher.render_keyed(0, &components[0])?.1.set(42);
    ///
    /// assert_eq!(dispatcher.render_keyed(0, &components[0])?.0, 42);
    /// assert_eq!(dispatcher.render_keyed(1, &components[1])?.0, 100);
    /// # Ok::<(), HookError>(())
    /// ```
    pub fn render_keyed<C, H, E>(&mut self, key: u64, component: &C) -> Result<H, E>
    where
        C: Fn(&mut Hooks) -> Result<H, E> + 'static,
        H: ComponentHandle<E>,
        E: From<HookError>,
    {
        self.render_as(ComponentId::keyed::<C>(key), component)
    }

    fn render_as<C, H, E>(&mut self, id: ComponentId, component: &C) -> Result<H, E>
    where
        C: Fn(&mut Hooks) -> Result<H, E> + 'static,
        H: ComponentHandle<E>,
        E: From<HookError>,
    {
        self.flush();

        log::trace!("rendering `{}`", id.name());

        let mut hooks = Hooks::begin(self.store.clone(), self.queue.clone(), id);

        let outcome = component(&mut hooks).and_then(|handle| {
            hooks.validate()?;
            handle.render()?;
            Ok(handle)
        });

        match outcome {
            Ok(handle) => {
                hooks.commit();
                Ok(handle)
            }
            Err(error) => {
                log::debug!("render of `{}` failed", id.name());
                hooks.rollback();
                Err(error)
            }
        }
    }

    /// Apply all queued updates now. Returns the number applied.
    pub fn flush(&self) -> usize {
        let mut store = self.store.lock();
        self.queue.drain_into(&mut store)
    }

    /// Discard all hook state of `component`.
    ///
    /// The next render of it starts from its hooks' initial values and records
    /// a new layout. Returns whether the component had any state.
    ///
    /// Setters minted before the unmount stay bound to the discarded state;
    /// their updates are dropped, even after the component is rendered again.
    pub fn unmount<C: ?Sized + 'static>(&mut self, component: &C) -> bool {
        self.unmount_id(ComponentId::of_val(component))
    }

    /// Discard all hook state of a component rendered with
    /// [`render_keyed`](Self::render_keyed).
    pub fn unmount_keyed<C: ?Sized + 'static>(&mut self, key: u64, _component: &C) -> bool {
        self.unmount_id(ComponentId::keyed::<C>(key))
    }

    fn unmount_id(&mut self, id: ComponentId) -> bool {
        self.flush();

        let removed = self.store.lock().remove(id);
        if removed {
            log::debug!("unmounted `{}`", id.name());
        }
        removed
    }

    /// Read access to the store.
    ///
    /// The store's spin lock is held while `f` runs. Taking `&mut self` keeps
    /// `f` from reaching this dispatcher, which would spin forever.
    pub fn inspect<R>(&mut self, f: impl FnOnce(&StateStore) -> R) -> R {
        let store = self.store.lock();
        f(&store)
    }

    /// Move the store's contents out, leaving this dispatcher empty.
    ///
    /// Queued updates are applied first. Setters minted by this dispatcher keep
    /// targeting it, not the returned store.
    pub fn take_store(&mut self) -> StateStore {
        self.flush();
        self.store.lock().take()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatch for Dispatcher {
    fn render<C, H, E>(&mut self, component: &C) -> Result<H, E>
    where
        C: Fn(&mut Hooks) -> Result<H, E> + 'static,
        H: ComponentHandle<E>,
        E: From<HookError>,
    {
        Dispatcher::render(self, component)
    }
}

/// Render facade: run a render cycle on the given dispatcher.
///
/// The dispatcher is resolved from the argument on every call, so any
/// [`Dispatch`] implementation can be substituted at the call site.
pub fn render<D, C, H, E>(dispatcher: &mut D, component: &C) -> Result<H, E>
where
    D: Dispatch,
    C: Fn(&mut Hooks) -> Result<H, E> + 'static,
    H: ComponentHandle<E>,
    E: From<HookError>,
{
    dispatcher.render(component)
}

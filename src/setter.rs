//! Setter handles that queue updates for a hook slot.

#[cfg(feature = "no_std")]
use alloc::boxed::Box;

use core::fmt;

use flume::{Receiver, Sender};

use crate::store::{SlotKey, StateStore};
use crate::Update;

pub(crate) type PendingUpdate = Box<dyn FnOnce(&mut StateStore) + Send>;

/// FIFO of updates issued by setters, drained by the dispatcher before reads.
#[derive(Clone)]
pub(crate) struct UpdateQueue {
    sender: Sender<PendingUpdate>,
    receiver: Receiver<PendingUpdate>,
}

impl UpdateQueue {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    pub(crate) fn sender(&self) -> Sender<PendingUpdate> {
        self.sender.clone()
    }

    /// Apply every queued update to `store` in the order it was issued.
    pub(crate) fn drain_into(&self, store: &mut StateStore) -> usize {
        let mut applied = 0;
        while let Ok(pending) = self.receiver.try_recv() {
            pending(store);
            applied += 1;
        }
        applied
    }
}

/// Setter for one hook slot, returned by [`Hooks::use_state`](crate::Hooks::use_state).
///
/// Clone this handle to embed it in a component handle's callbacks. Setting
/// never blocks: the update is queued on the owning dispatcher and reduced
/// into the slot before the next state read, in the order updates were issued.
/// While the slot has never been written, the `initial` value passed to the
/// `use_state` call that minted this setter stands in as the previous value.
///
/// Setters may outlive their dispatcher; updates sent after it is dropped are
/// discarded.
///
/// # Example
///
/// ```rust
/// use oxide_hooks::{ComponentHandle, Dispatcher, HookError, Hooks, SetState};
///
/// struct Counter {
///     count: i32,
///     set_count: SetState<i32>,
/// }
///
/// impl ComponentHandle for Counter {
///     fn render(&self) -> Result<(), HookError> {
///         Ok(())
///     }
/// }
///
/// fn counter(hooks: &mut Hooks) -> Result<Counter, HookError> {
///     let (count, set_count) = hooks.use_state(0)?;
///     Ok(Counter { count, set_count })
/// }
///
/// let mut dispatcher = Dispatcher::new();
/// let handle = dispatcher.render(&counter)?;
///
/// handle.set_count.set(10);
/// handle.set_count.update(|count| count + 1);
///
/// assert_eq!(dispatcher.render(&counter)?.count, 11);
/// # Ok::<(), HookError>(())
/// ```
pub struct SetState<T> {
    key: SlotKey,
    fallback: T,
    sender: Sender<PendingUpdate>,
}

impl<T: Clone> Clone for SetState<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            fallback: self.fallback.clone(),
            sender: self.sender.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> SetState<T> {
    pub(crate) fn new(key: SlotKey, fallback: T, sender: Sender<PendingUpdate>) -> Self {
        Self {
            key,
            fallback,
            sender,
        }
    }

    /// Queue an update for this slot.
    ///
    /// Accepts an [`Update`] or a plain value, which is treated as a literal.
    pub fn set(&self, update: impl Into<Update<T>>) {
        let key = self.key;
        let fallback = self.fallback.clone();
        let update = update.into();

        let pending: PendingUpdate =
            Box::new(move |store: &mut StateStore| store.apply(key, fallback, update));

        if self.sender.send(pending).is_err() {
            log::trace!(
                "dispatcher for `{}` is gone; discarding update",
                key.component.name()
            );
        }
    }

    /// Queue an updater deriving the next value from the previous one.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(T) -> T + Send + 'static,
    {
        self.set(Update::updater(f));
    }
}

impl<T> fmt::Debug for SetState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetState")
            .field("component", &self.key.component.name())
            .field("slot", &self.key.index)
            .finish_non_exhaustive()
    }
}

//! Persistent hook slots, keyed by component identity.

#[cfg(feature = "no_std")]
use alloc::boxed::Box;
#[cfg(feature = "no_std")]
use alloc::collections::BTreeMap;
#[cfg(feature = "no_std")]
use alloc::vec::Vec;
#[cfg(not(feature = "no_std"))]
use std::collections::BTreeMap;

use core::any::{type_name, Any, TypeId};
use core::mem;

use crate::{reduce, Update, Violation};

/// Identity of a component, derived from the component function's type.
///
/// Every function item and every closure expression has its own type, so
/// rendering the same function (or the same closure value) again resolves to
/// the same identity. Values that share a type share an identity:
///
/// - two values of one closure type, even when their captures differ,
/// - every `fn` pointer with the same signature,
/// - every `Box<dyn Fn(&mut Hooks) -> ...>` with the same signature.
///
/// Render such components through
/// [`Dispatcher::render_keyed`](crate::Dispatcher::render_keyed) to tell them
/// apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId {
    type_id: TypeId,
    key: Option<u64>,
    name: &'static str,
}

impl ComponentId {
    /// Identity of the component type `C`.
    pub fn of<C: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            key: None,
            name: type_name::<C>(),
        }
    }

    /// Identity of the component type `C`, distinguished by `key`.
    pub fn keyed<C: ?Sized + 'static>(key: u64) -> Self {
        Self {
            key: Some(key),
            ..Self::of::<C>()
        }
    }

    /// Identity of the given component value.
    pub fn of_val<C: ?Sized + 'static>(_component: &C) -> Self {
        Self::of::<C>()
    }

    /// The component's type name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The key given to [`keyed`](Self::keyed), if any.
    pub fn key(&self) -> Option<u64> {
        self.key
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SlotKey {
    pub(crate) component: ComponentId,
    pub(crate) generation: u64,
    pub(crate) index: usize,
}

#[derive(Debug)]
struct Slot {
    type_id: TypeId,
    type_name: &'static str,
    // `None` until the first update lands; stored values are never compared
    // against the hook's initial value.
    value: Option<Box<dyn Any + Send>>,
}

impl Slot {
    fn vacant<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            value: None,
        }
    }
}

#[derive(Debug)]
struct ComponentSlots {
    slots: Vec<Slot>,
    committed: bool,
    // Distinguishes this mount from earlier ones of the same component, so
    // setters minted before an unmount or rollback cannot reach it.
    generation: u64,
}

impl ComponentSlots {
    fn mounted(generation: u64) -> Self {
        Self {
            slots: Vec::new(),
            committed: false,
            generation,
        }
    }
}

/// Storage for every hook slot owned by a [`Dispatcher`](crate::Dispatcher).
///
/// Each component identity owns an ordered sequence of slots, one per
/// `use_state` call position. The sequence is fixed once a render of that
/// component has completed successfully.
#[derive(Debug, Default)]
pub struct StateStore {
    components: BTreeMap<ComponentId, ComponentSlots>,
    next_generation: u64,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of component identities holding slots.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Number of slots recorded for `component`, or `None` if it was never
    /// rendered successfully (or has been removed).
    pub fn slot_count(&self, component: ComponentId) -> Option<usize> {
        self.components
            .get(&component)
            .map(|entry| entry.slots.len())
    }

    /// Whether the slot at `index` holds a value written by an update.
    pub fn is_initialized(&self, component: ComponentId, index: usize) -> bool {
        self.components
            .get(&component)
            .and_then(|entry| entry.slots.get(index))
            .is_some_and(|slot| slot.value.is_some())
    }

    /// Drop every slot of `component`. Returns whether anything was removed.
    pub fn remove(&mut self, component: ComponentId) -> bool {
        self.components.remove(&component).is_some()
    }

    /// Drop every slot of every component.
    pub fn clear(&mut self) {
        self.components.clear();
    }

    /// Move the slots out into a new store. Generations keep counting in
    /// `self`, so setters minted against the moved slots never match a later
    /// mount here.
    pub(crate) fn take(&mut self) -> StateStore {
        StateStore {
            components: mem::take(&mut self.components),
            next_generation: self.next_generation,
        }
    }

    /// Mount `component` if it has no slots yet. Returns the mount's generation.
    pub(crate) fn begin(&mut self, component: ComponentId) -> u64 {
        let next_generation = &mut self.next_generation;
        self.components
            .entry(component)
            .or_insert_with(|| {
                let generation = *next_generation;
                *next_generation += 1;
                ComponentSlots::mounted(generation)
            })
            .generation
    }

    /// Claim the slot at `key`, returning its stored value if it has one.
    pub(crate) fn claim<T: Clone + Send + 'static>(
        &mut self,
        key: SlotKey,
    ) -> Result<Option<T>, Violation> {
        let Some(entry) = self
            .components
            .get_mut(&key.component)
            .filter(|entry| entry.generation == key.generation)
        else {
            // The mount is created in `begin` and outlives the render.
            return Err(Violation::ExtraHook { expected: 0 });
        };

        match entry.slots.get(key.index) {
            Some(slot) if slot.type_id != TypeId::of::<T>() => Err(Violation::TypeChanged {
                expected: slot.type_name,
                found: type_name::<T>(),
            }),
            Some(slot) => Ok(slot
                .value
                .as_ref()
                .and_then(|value| value.downcast_ref::<T>())
                .cloned()),
            None if entry.committed => Err(Violation::ExtraHook {
                expected: entry.slots.len(),
            }),
            None => {
                entry.slots.push(Slot::vacant::<T>());
                Ok(None)
            }
        }
    }

    /// Check that a finished render claimed every committed slot.
    pub(crate) fn validate(&self, component: ComponentId, claimed: usize) -> Result<(), Violation> {
        match self.components.get(&component) {
            Some(entry) if entry.committed && claimed < entry.slots.len() => {
                Err(Violation::MissingHook {
                    expected: entry.slots.len(),
                    found: claimed,
                })
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn commit(&mut self, component: ComponentId) {
        if let Some(entry) = self.components.get_mut(&component) {
            if !entry.committed {
                entry.committed = true;
                log::debug!(
                    "committed {} hook slot(s) for `{}`",
                    entry.slots.len(),
                    component.name()
                );
            }
        }
    }

    /// Discard a layout that no render has committed yet.
    pub(crate) fn rollback(&mut self, component: ComponentId) {
        let uncommitted = self
            .components
            .get(&component)
            .is_some_and(|entry| !entry.committed);

        if uncommitted {
            self.components.remove(&component);
            log::debug!("rolled back first render of `{}`", component.name());
        }
    }

    /// Reduce `update` into the slot at `key`, using `fallback` as the
    /// previous value when the slot has never been written.
    pub(crate) fn apply<T: Send + 'static>(&mut self, key: SlotKey, fallback: T, update: Update<T>) {
        let slot = self
            .components
            .get_mut(&key.component)
            .filter(|entry| entry.generation == key.generation)
            .and_then(|entry| entry.slots.get_mut(key.index))
            .filter(|slot| slot.type_id == TypeId::of::<T>());

        let Some(slot) = slot else {
            log::warn!(
                "dropping update for slot {} of `{}`: mount {} no longer exists",
                key.index,
                key.component.name(),
                key.generation
            );
            return;
        };

        let previous = slot
            .value
            .take()
            .and_then(|value| value.downcast::<T>().ok())
            .map_or(fallback, |value| *value);

        slot.value = Some(Box::new(reduce(previous, update)));
    }
}

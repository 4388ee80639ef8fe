//! Observer List - Ordered, re-entrancy safe set of weak observer references
//!
//! The list is the fan-out primitive behind every web contents broadcast.
//! It never owns an observer: each slot holds a `Weak` that is upgraded only
//! for the duration of a single hook call.
//!
//! # Mutation during iteration
//!
//! ```text
//!  slots:  [ A ][ B ][ C ]          remove(B) outside a pass -> [ A ][ C ]
//!
//!  pass:   [ A ][ B ][ C ]          remove(B) while visiting A
//!            ^
//!          [ A ][ - ][ C ]          B tombstoned, skipped by the cursor
//!                                   compacted once the outermost pass ends
//! ```
//!
//! No `RefCell` borrow is held while a hook runs, so hooks may freely call
//! back into the list (add, remove, clear, or start a nested pass).

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{trace, warn};

use crate::config::{ObserverListConfig, ObserverListPolicy};

type Slot<O> = Option<Weak<O>>;

/// Identity of an observer: the address of its allocation, metadata stripped.
pub(crate) fn identity<T: ?Sized>(observer: *const T) -> *const () {
    observer.cast::<()>()
}

/// Ordered list of non-owning observer references.
///
/// Single-threaded by construction (`Rc`/`RefCell`), so the compiler confines
/// a list to the thread that owns it.
pub struct ObserverList<O: ?Sized> {
    slots: RefCell<Vec<Slot<O>>>,
    iteration_depth: Cell<usize>,
    policy: ObserverListPolicy,
    check_empty: bool,
}

impl<O: ?Sized> ObserverList<O> {
    /// Create an empty list with the default configuration
    pub fn new() -> Self {
        Self::with_config(ObserverListConfig::default())
    }

    /// Create an empty list with a custom configuration
    pub fn with_config(config: ObserverListConfig) -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
            iteration_depth: Cell::new(0),
            policy: config.policy,
            check_empty: config.check_empty,
        }
    }

    /// Policy applied to observers added during a pass
    pub fn policy(&self) -> ObserverListPolicy {
        self.policy
    }

    /// Register an observer held by `Rc`.
    pub fn add(&self, observer: &Rc<O>) {
        self.add_weak(Rc::downgrade(observer));
    }

    /// Register an observer from an existing weak reference.
    ///
    /// Appends to the end of the list. Adding an observer that is already
    /// registered is a no-op, as is adding one whose owner already dropped it.
    pub fn add_weak(&self, observer: Weak<O>) {
        if observer.strong_count() == 0 {
            trace!("[ObserverList] Ignoring add of a dropped observer");
            return;
        }

        let id = identity(observer.as_ptr());
        let mut slots = self.slots.borrow_mut();
        if slots.iter().flatten().any(|w| identity(w.as_ptr()) == id) {
            trace!("[ObserverList] Observer already registered");
            return;
        }

        slots.push(Some(observer));
        trace!(
            observers = slots.len(),
            in_pass = self.iteration_depth.get() > 0,
            "[ObserverList] Added observer"
        );
    }

    /// Deregister an observer.
    ///
    /// Takes the observer itself (`&*rc` from the owner, or `self` from
    /// inside a hook), never the `Rc` holding it. Removing an absent observer
    /// is a no-op. During a pass the slot is tombstoned so the cursor skips
    /// it; the list is compacted when the outermost pass finishes.
    pub fn remove(&self, observer: &O) {
        self.remove_identity(identity(observer as *const O));
    }

    /// Whether `observer` is currently registered
    pub fn has_observer(&self, observer: &O) -> bool {
        self.contains_identity(identity(observer as *const O))
    }

    pub(crate) fn remove_identity(&self, id: *const ()) {
        let mut slots = self.slots.borrow_mut();
        let Some(index) = slots
            .iter()
            .position(|slot| matches!(slot, Some(w) if identity(w.as_ptr()) == id))
        else {
            trace!("[ObserverList] Remove of unregistered observer ignored");
            return;
        };

        if self.iteration_depth.get() > 0 {
            slots[index] = None;
        } else {
            slots.remove(index);
        }
        trace!(index, "[ObserverList] Removed observer");
    }

    pub(crate) fn contains_identity(&self, id: *const ()) -> bool {
        self.slots
            .borrow()
            .iter()
            .flatten()
            .any(|w| identity(w.as_ptr()) == id && w.strong_count() > 0)
    }

    /// Deregister every observer.
    ///
    /// Inside a pass, no further hook fires for the remainder of that pass.
    pub fn clear(&self) {
        let mut slots = self.slots.borrow_mut();
        if self.iteration_depth.get() > 0 {
            slots.iter_mut().for_each(|slot| *slot = None);
        } else {
            slots.clear();
        }
    }

    /// Number of live observers
    pub fn len(&self) -> usize {
        self.slots
            .borrow()
            .iter()
            .flatten()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Whether no live observer is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a pass is currently running on this list
    pub fn is_iterating(&self) -> bool {
        self.iteration_depth.get() > 0
    }

    /// Visit every registered observer in registration order.
    ///
    /// Observers removed earlier in the same pass are skipped. Observers added
    /// during the pass are visited only under [`ObserverListPolicy::AllObservers`].
    /// Each observer is visited at most once per pass.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&O),
    {
        let end = match self.policy {
            ObserverListPolicy::ExistingOnly => self.slots.borrow().len(),
            ObserverListPolicy::AllObservers => usize::MAX,
        };

        let _pass = PassGuard::enter(self);
        let mut index = 0;
        loop {
            let observer = {
                let mut slots = self.slots.borrow_mut();
                if index >= end.min(slots.len()) {
                    break;
                }
                let slot = &mut slots[index];
                index += 1;

                let Some(weak) = slot.as_ref() else {
                    continue;
                };
                match weak.upgrade() {
                    Some(observer) => observer,
                    None => {
                        warn!(
                            index = index - 1,
                            "[ObserverList] Observer was dropped without being removed"
                        );
                        *slot = None;
                        continue;
                    }
                }
            };

            f(&*observer);
        }
    }

    fn compact(&self) {
        let mut slots = self.slots.borrow_mut();
        let before = slots.len();
        slots.retain(|slot| matches!(slot, Some(w) if w.strong_count() > 0));
        if slots.len() != before {
            trace!(
                compacted = before - slots.len(),
                "[ObserverList] Compacted tombstones"
            );
        }
    }
}

impl<O: ?Sized> Default for ObserverList<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ?Sized> fmt::Debug for ObserverList<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("observers", &self.len())
            .field("iteration_depth", &self.iteration_depth.get())
            .field("policy", &self.policy)
            .finish()
    }
}

impl<O: ?Sized> Drop for ObserverList<O> {
    fn drop(&mut self) {
        if self.check_empty {
            let remaining = self.len();
            if remaining > 0 {
                warn!(
                    remaining,
                    "[ObserverList] Dropped while observers are still registered"
                );
            }
        }
    }
}

/// Tracks pass nesting; compacts once the outermost pass ends, even on unwind.
struct PassGuard<'a, O: ?Sized> {
    list: &'a ObserverList<O>,
}

impl<'a, O: ?Sized> PassGuard<'a, O> {
    fn enter(list: &'a ObserverList<O>) -> Self {
        list.iteration_depth.set(list.iteration_depth.get() + 1);
        Self { list }
    }
}

impl<O: ?Sized> Drop for PassGuard<'_, O> {
    fn drop(&mut self) {
        let depth = self.list.iteration_depth.get() - 1;
        self.list.iteration_depth.set(depth);
        if depth == 0 {
            self.list.compact();
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

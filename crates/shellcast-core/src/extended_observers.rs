//! Extended web contents observers
//!
//! The registry a web contents owns for the events its engine delegate
//! receives but its engine observers never see. Broadcasts are synchronous
//! and follow registration order; see [`ObserverList`] for the rules on
//! mutation during a broadcast.

use std::rc::{Rc, Weak};

use tracing::trace;

use crate::config::ObserverListConfig;
use crate::domain::DraggableRegion;
use crate::observer::WebContentsObserver;
use crate::observer_list::{identity, ObserverList};

/// Registry of [`WebContentsObserver`]s with one broadcast per hook
#[derive(Debug, Default)]
pub struct ExtendedObserverList {
    observers: ObserverList<dyn WebContentsObserver>,
}

impl ExtendedObserverList {
    /// Create an empty list with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty list with a custom configuration
    pub fn with_config(config: ObserverListConfig) -> Self {
        Self {
            observers: ObserverList::with_config(config),
        }
    }

    /// Register an observer. Duplicate adds are a no-op.
    pub fn add_observer<T>(&self, observer: &Rc<T>)
    where
        T: WebContentsObserver + 'static,
    {
        let weak = Rc::downgrade(observer);
        let weak: Weak<dyn WebContentsObserver> = weak;
        self.observers.add_weak(weak);
    }

    /// Register an observer already erased to a trait object
    pub fn add_dyn_observer(&self, observer: &Rc<dyn WebContentsObserver>) {
        self.observers.add(observer);
    }

    /// Deregister an observer. Safe to call from inside any hook, including
    /// the observer's own.
    ///
    /// Pass the observer itself: `&*rc` from the owner or `self` from a hook.
    /// The `Rc` handle is not an observer and is rejected at compile time:
    ///
    /// ```compile_fail
    /// use std::rc::Rc;
    /// use shellcast_core::{ExtendedObserverList, WebContentsObserver};
    ///
    /// struct Chrome;
    /// impl WebContentsObserver for Chrome {}
    ///
    /// let list = ExtendedObserverList::new();
    /// let chrome = Rc::new(Chrome);
    /// list.add_observer(&chrome);
    /// list.remove_observer(&chrome);
    /// ```
    ///
    /// ```
    /// use std::rc::Rc;
    /// use shellcast_core::{ExtendedObserverList, WebContentsObserver};
    ///
    /// struct Chrome;
    /// impl WebContentsObserver for Chrome {}
    ///
    /// let list = ExtendedObserverList::new();
    /// let chrome = Rc::new(Chrome);
    /// list.add_observer(&chrome);
    /// list.remove_observer(&*chrome);
    /// assert!(!list.has_observer(&*chrome));
    /// ```
    pub fn remove_observer<T>(&self, observer: &T)
    where
        T: WebContentsObserver + ?Sized,
    {
        self.observers.remove_identity(identity(observer as *const T));
    }

    /// Whether `observer` is currently registered
    pub fn has_observer<T>(&self, observer: &T) -> bool
    where
        T: WebContentsObserver + ?Sized,
    {
        self.observers
            .contains_identity(identity(observer as *const T))
    }

    /// Deregister every observer
    pub fn clear(&self) {
        self.observers.clear();
    }

    /// Number of live observers
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no live observer is registered
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Notify observers that the content area is closing
    pub fn notify_close_contents(&self) {
        trace!("[ExtendedObservers] Broadcasting close_contents");
        self.observers.for_each(|o| o.on_close_contents());
    }

    /// Notify observers that the renderer is responsive again
    pub fn notify_renderer_responsive(&self) {
        trace!("[ExtendedObservers] Broadcasting renderer_responsive");
        self.observers.for_each(|o| o.on_renderer_responsive());
    }

    /// Notify observers of new draggable region geometry
    pub fn notify_draggable_regions_updated(&self, regions: &[DraggableRegion]) {
        trace!(
            regions = regions.len(),
            "[ExtendedObservers] Broadcasting draggable_regions_updated"
        );
        self.observers
            .for_each(|o| o.on_draggable_regions_updated(regions));
    }

    /// Run `f` against every registered observer, in registration order.
    ///
    /// Lets owners dispatch hooks added by extension traits without growing
    /// this type.
    pub fn for_each_observer<F>(&self, mut f: F)
    where
        F: FnMut(&dyn WebContentsObserver),
    {
        self.observers.for_each(|o| f(o));
    }
}

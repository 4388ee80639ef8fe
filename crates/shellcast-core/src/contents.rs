//! Shell web contents
//!
//! The window/tab object that owns an [`ExtendedObserverList`]. Engine glue
//! calls the inbound methods here when the engine's delegate reports the
//! corresponding event; the contents fans it out to its observers.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use uuid::Uuid;

use crate::config::ObserverListConfig;
use crate::domain::DraggableRegion;
use crate::extended_observers::ExtendedObserverList;
use crate::observer::WebContentsObserver;

/// A web contents and the observers listening to it
#[derive(Debug)]
pub struct ShellWebContents {
    id: Uuid,
    observers: Rc<ExtendedObserverList>,
    draggable_regions: RefCell<Vec<DraggableRegion>>,
}

impl ShellWebContents {
    /// Create a contents with a fresh id
    pub fn new(config: ObserverListConfig) -> Self {
        Self::with_id(Uuid::new_v4(), config)
    }

    /// Create a contents with a caller-chosen id
    pub fn with_id(id: Uuid, config: ObserverListConfig) -> Self {
        debug!(contents_id = %id, policy = config.policy.as_str(), "[WebContents] Created");
        Self {
            id,
            observers: Rc::new(ExtendedObserverList::with_config(config)),
            draggable_regions: RefCell::new(Vec::new()),
        }
    }

    /// Unique id of this contents
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Shared handle to the observer list.
    ///
    /// Observers that need to deregister from inside a hook keep a `Weak` to
    /// this list.
    pub fn observers(&self) -> Rc<ExtendedObserverList> {
        Rc::clone(&self.observers)
    }

    /// Register an observer. Duplicate adds are a no-op.
    pub fn add_observer<T>(&self, observer: &Rc<T>)
    where
        T: WebContentsObserver + 'static,
    {
        self.observers.add_observer(observer);
    }

    /// Deregister an observer, given as `&*rc` or `self`
    pub fn remove_observer<T>(&self, observer: &T)
    where
        T: WebContentsObserver + ?Sized,
    {
        self.observers.remove_observer(observer);
    }

    /// Whether `observer` is currently registered
    pub fn has_observer<T>(&self, observer: &T) -> bool
    where
        T: WebContentsObserver + ?Sized,
    {
        self.observers.has_observer(observer)
    }

    /// Most recent draggable regions reported for this contents
    pub fn draggable_regions(&self) -> Vec<DraggableRegion> {
        self.draggable_regions.borrow().clone()
    }

    /// The engine asked for the content area to close
    pub fn close_contents(&self) {
        debug!(
            contents_id = %self.id,
            observers = self.observers.len(),
            "[WebContents] Close contents"
        );
        self.observers.notify_close_contents();
    }

    /// The renderer recovered from a hang
    pub fn renderer_responsive(&self) {
        debug!(contents_id = %self.id, "[WebContents] Renderer responsive");
        self.observers.notify_renderer_responsive();
    }

    /// Draggable region geometry was recomputed.
    ///
    /// The regions are recorded before observers are notified, so an observer
    /// reading [`draggable_regions`](Self::draggable_regions) sees the new set.
    pub fn update_draggable_regions(&self, regions: Vec<DraggableRegion>) {
        debug!(
            contents_id = %self.id,
            regions = regions.len(),
            "[WebContents] Draggable regions updated"
        );
        *self.draggable_regions.borrow_mut() = regions;

        // Observers may trigger another update from inside their hook, so the
        // borrow is not held across the broadcast.
        let regions = self.draggable_regions();
        self.observers.notify_draggable_regions_updated(&regions);
    }
}

impl Default for ShellWebContents {
    fn default() -> Self {
        Self::new(ObserverListConfig::default())
    }
}

//! Web contents observer hooks
//!
//! Certain lifecycle events are only visible to the engine's delegate, so the
//! shell provides its own observer to dispatch them to interested parties.
//! Every hook has a no-op default; implementors override only what they need.

use crate::domain::DraggableRegion;

/// Listener for web contents lifecycle events that the engine's own observer
/// interface does not expose.
///
/// Observers are registered with an [`ExtendedObserverList`] by reference
/// (`Rc`). The list keeps only a weak association, so the observer's owner
/// stays in charge of its lifetime.
///
/// [`ExtendedObserverList`]: crate::ExtendedObserverList
pub trait WebContentsObserver {
    /// The content area is about to close.
    fn on_close_contents(&self) {}

    /// The renderer recovered from an unresponsive state.
    fn on_renderer_responsive(&self) {}

    /// Draggable region geometry was recomputed.
    ///
    /// `regions` is borrowed for the duration of the call only.
    fn on_draggable_regions_updated(&self, _regions: &[DraggableRegion]) {}
}

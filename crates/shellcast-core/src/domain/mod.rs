//! Domain types shared by observers and the event bus
//!
//! - Value objects (Rect, DraggableRegion)
//! - Lifecycle events (ContentsEvent enum and its envelope)

mod event;
mod region;

pub use event::{ContentsEvent, ContentsEventEnvelope};
pub use region::{is_draggable_at, DraggableRegion, Rect};

//! Contents Events - Serializable form of the web contents lifecycle hooks
//!
//! Observer hooks are synchronous and confined to the owning thread. These
//! events are their transport form: the event forwarder converts each hook
//! into a [`ContentsEvent`] and publishes it on the event bus, where consumers
//! on other tasks pick it up.
//!
//! # Serialization
//!
//! Events serialize with a `type` field containing the snake_case variant name:
//! ```json
//! { "type": "renderer_responsive", "contents_id": "..." }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DraggableRegion;

/// Lifecycle events of a single web contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentsEvent {
    /// The content area is closing
    CloseContents { contents_id: Uuid },

    /// The renderer became responsive again
    RendererResponsive { contents_id: Uuid },

    /// Draggable regions were recomputed
    DraggableRegionsUpdated {
        contents_id: Uuid,
        regions: Vec<DraggableRegion>,
    },
}

impl ContentsEvent {
    /// Get the event type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::CloseContents { .. } => "close_contents",
            Self::RendererResponsive { .. } => "renderer_responsive",
            Self::DraggableRegionsUpdated { .. } => "draggable_regions_updated",
        }
    }

    /// The web contents this event belongs to
    pub fn contents_id(&self) -> Uuid {
        match self {
            Self::CloseContents { contents_id }
            | Self::RendererResponsive { contents_id }
            | Self::DraggableRegionsUpdated { contents_id, .. } => *contents_id,
        }
    }

    /// Whether consumers should tear down state tied to this contents
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CloseContents { .. })
    }
}

/// Event with metadata, as published on the bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentsEventEnvelope {
    /// Unique event ID
    pub event_id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: ContentsEvent,
}

impl ContentsEventEnvelope {
    /// Wrap an event with metadata
    pub fn new(event: ContentsEvent) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

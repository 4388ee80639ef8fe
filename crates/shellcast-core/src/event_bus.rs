//! Event Bus - Cross-thread distribution of web contents lifecycle events
//!
//! Observer lists are confined to the thread that owns the web contents.
//! Consumers that live elsewhere (window chrome running on another task,
//! audit logging, IPC bridges) subscribe to this bus instead; an
//! [`EventForwarder`] registered as an ordinary observer republishes every
//! hook it receives.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐  hooks   ┌────────────────┐  emit   ┌──────────────────────┐
//! │ ShellWebContents │ ───────► │ EventForwarder │ ──────► │ EventBus (broadcast) │
//! │ (owning thread)  │          │  (observer)    │         └──────────┬───────────┘
//! └──────────────────┘          └────────────────┘                    │ recv
//!                                                         ┌───────────┼───────────┐
//!                                                         ▼           ▼           ▼
//!                                                     consumer1   consumer2   consumerN
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! let forwarder = Rc::new(EventForwarder::new(contents.id(), bus.sender()));
//! contents.add_observer(&forwarder);
//!
//! contents.renderer_responsive();
//! while let Some(envelope) = rx.recv().await { ... }
//! ```

use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{ContentsEvent, ContentsEventEnvelope, DraggableRegion};
use crate::observer::WebContentsObserver;

/// Default channel capacity for the event bus
pub const DEFAULT_CAPACITY: usize = 256;

/// Event Bus - Central hub for contents event distribution
///
/// Uses a broadcast channel so every subscriber receives every event
/// emitted after it subscribed.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ContentsEventEnvelope>,
}

impl EventBus {
    /// Create a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a new event bus with custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Get a sender for emitting events
    pub fn sender(&self) -> EventSender {
        EventSender::new(self.sender.clone())
    }

    /// Subscribe to receive events
    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver::new(self.sender.subscribe())
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Event Sender - Used to emit contents events
///
/// Thread-safe and cheaply cloneable.
#[derive(Clone)]
pub struct EventSender {
    sender: broadcast::Sender<ContentsEventEnvelope>,
}

impl EventSender {
    fn new(sender: broadcast::Sender<ContentsEventEnvelope>) -> Self {
        Self { sender }
    }

    /// Emit an event
    ///
    /// Returns the number of receivers that received the event.
    /// Returns 0 if there are no subscribers (not an error).
    pub fn emit(&self, envelope: ContentsEventEnvelope) -> usize {
        let type_name = envelope.event.type_name();
        match self.sender.send(envelope) {
            Ok(count) => {
                debug!(
                    event_type = type_name,
                    receivers = count,
                    "[EventBus] Emitted event"
                );
                count
            }
            Err(_) => {
                debug!(event_type = type_name, "[EventBus] No receivers for event");
                0
            }
        }
    }

    /// Check if there are any subscribers
    pub fn has_subscribers(&self) -> bool {
        self.sender.receiver_count() > 0
    }
}

/// Event Receiver - Used by consumers to receive contents events
pub struct EventReceiver {
    receiver: broadcast::Receiver<ContentsEventEnvelope>,
}

impl EventReceiver {
    fn new(receiver: broadcast::Receiver<ContentsEventEnvelope>) -> Self {
        Self { receiver }
    }

    /// Receive the next event (async)
    ///
    /// Returns `None` if the channel is closed.
    /// Handles lag gracefully by logging and continuing.
    pub async fn recv(&mut self) -> Option<ContentsEventEnvelope> {
        loop {
            match self.receiver.recv().await {
                Ok(envelope) => return Some(envelope),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(
                        skipped_events = skipped,
                        "[EventBus] Receiver lagged, skipped {} events", skipped
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("[EventBus] Channel closed");
                    return None;
                }
            }
        }
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&mut self) -> Option<ContentsEventEnvelope> {
        match self.receiver.try_recv() {
            Ok(envelope) => Some(envelope),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!(
                    skipped_events = skipped,
                    "[EventBus] Receiver lagged on try_recv"
                );
                self.receiver.try_recv().ok()
            }
            Err(_) => None,
        }
    }
}

/// Observer that republishes every hook on the event bus
pub struct EventForwarder {
    contents_id: Uuid,
    sender: EventSender,
}

impl EventForwarder {
    pub fn new(contents_id: Uuid, sender: EventSender) -> Self {
        Self {
            contents_id,
            sender,
        }
    }

    pub fn contents_id(&self) -> Uuid {
        self.contents_id
    }

    fn forward(&self, event: ContentsEvent) {
        self.sender.emit(ContentsEventEnvelope::new(event));
    }
}

impl WebContentsObserver for EventForwarder {
    fn on_close_contents(&self) {
        self.forward(ContentsEvent::CloseContents {
            contents_id: self.contents_id,
        });
    }

    fn on_renderer_responsive(&self) {
        self.forward(ContentsEvent::RendererResponsive {
            contents_id: self.contents_id,
        });
    }

    fn on_draggable_regions_updated(&self, regions: &[DraggableRegion]) {
        self.forward(ContentsEvent::DraggableRegionsUpdated {
            contents_id: self.contents_id,
            regions: regions.to_vec(),
        });
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! # Shellcast Core Library
//!
//! Lifecycle event fan-out for browser-shell web contents.
//!
//! ## Modules
//!
//! - `observer` - The `WebContentsObserver` hook trait
//! - `observer_list` - Generic ordered list of weak observers, safe to mutate mid-broadcast
//! - `extended_observers` - Observer list specialized with one broadcast per hook
//! - `contents` - `ShellWebContents`, the owner that receives engine events
//! - `domain` - Draggable regions and serializable lifecycle events
//! - `event_bus` - Cross-thread distribution of lifecycle events
//! - `config` - Observer list configuration

pub mod config;
pub mod contents;
pub mod domain;
pub mod event_bus;
pub mod extended_observers;
pub mod observer;
pub mod observer_list;

// Re-export commonly used types
pub use config::{ConfigError, ObserverListConfig, ObserverListPolicy};
pub use contents::ShellWebContents;
pub use domain::*;
pub use extended_observers::ExtendedObserverList;
pub use observer::WebContentsObserver;
pub use observer_list::ObserverList;

pub use event_bus::{EventBus, EventForwarder, EventReceiver, EventSender};

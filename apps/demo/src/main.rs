//! Shellcast demo
//!
//! Simulates a short web contents lifecycle: a window chrome controller and
//! the event bus forwarder observe one contents, the engine reports a few
//! events, and a consumer task logs what arrives on the bus.

mod config;

use std::path::PathBuf;
use std::rc::{Rc, Weak};

use anyhow::Result;
use shellcast_core::{
    DraggableRegion, EventBus, EventForwarder, ExtendedObserverList, Rect, ShellWebContents,
    WebContentsObserver,
};
use tracing::{info, warn};

use config::ShellcastConfig;

/// Initialize tracing with console and file logging
///
/// - Console: colored, compact format
/// - File: daily rotation under the configured logs directory
fn init_tracing(config: &ShellcastConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let logs_dir = config.logs_dir();
    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Failed to create logs directory: {}", e);
    }

    // Creates files like: shellcast.2026-10-19.log
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("shellcast")
        .filename_suffix("log")
        .build(&logs_dir)?;
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    // RUST_LOG takes precedence over the defaults
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shellcast_core=debug,shellcast_demo=debug"));

    let console_layer = fmt::layer()
        .with_ansi(true)
        .compact()
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    // Must be kept alive for the duration of the program
    Ok(guard)
}

/// Window chrome controller: hides the frame when the contents closes and
/// stops listening afterwards.
struct WindowChrome {
    observers: Weak<ExtendedObserverList>,
}

impl WebContentsObserver for WindowChrome {
    fn on_close_contents(&self) {
        info!("[WindowChrome] Contents closing, hiding frame");
        if let Some(observers) = self.observers.upgrade() {
            observers.remove_observer(self);
        }
    }

    fn on_renderer_responsive(&self) {
        info!("[WindowChrome] Renderer responsive, clearing hang overlay");
    }

    fn on_draggable_regions_updated(&self, regions: &[DraggableRegion]) {
        let draggable = regions.iter().filter(|r| r.draggable).count();
        info!(
            draggable,
            no_drag = regions.len() - draggable,
            "[WindowChrome] Updated drag areas"
        );
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ShellcastConfig::load(std::env::args_os().nth(1).map(PathBuf::from))?;
    let _guard = init_tracing(&config)?;

    let bus = EventBus::with_capacity(config.bus_capacity);
    let mut receiver = bus.subscribe();
    let consumer = tokio::spawn(async move {
        let mut received = 0usize;
        while let Some(envelope) = receiver.recv().await {
            received += 1;
            info!(
                event_type = envelope.event.type_name(),
                contents_id = %envelope.event.contents_id(),
                "[Consumer] Received event"
            );
        }
        received
    });

    let contents = ShellWebContents::new(config.observers);
    let chrome = Rc::new(WindowChrome {
        observers: Rc::downgrade(&contents.observers()),
    });
    let forwarder = Rc::new(EventForwarder::new(contents.id(), bus.sender()));
    contents.add_observer(&chrome);
    contents.add_observer(&forwarder);

    contents.update_draggable_regions(vec![
        DraggableRegion::draggable(Rect::new(0, 0, 1024, 32)),
        DraggableRegion::no_drag(Rect::new(940, 0, 84, 32)),
    ]);
    contents.renderer_responsive();
    contents.close_contents();

    if contents.has_observer(&*chrome) {
        warn!("[Demo] Window chrome is still registered after close");
    }

    // Closing the channel ends the consumer loop
    contents.remove_observer(&*forwarder);
    drop(forwarder);
    drop(bus);

    let received = consumer.await?;
    info!(received, "[Demo] Done");
    Ok(())
}

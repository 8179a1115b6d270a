//! Lifecycle of the libnotify notifier: register, connect, run, shut down.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};
use yubitouch_core::{NotifierConfig, TouchEvent};

use crate::notifications::{
    NotificationController, NotificationPayload, NotificationTransport, TransportError,
};
use crate::registry::NotifierRegistry;

/// Registry key of the desktop notifier.
pub const LIBNOTIFY_NOTIFIER: &str = "notifier/libnotify";

/// Runs the desktop notifier until its queue closes.
///
/// The queue is registered under [`LIBNOTIFY_NOTIFIER`] before connecting.
/// If the initial connection fails the error is logged, the queue is removed
/// again and the error returned; nothing is retried.
pub async fn run_libnotify_notifier<T>(
    registry: NotifierRegistry,
    config: &NotifierConfig,
    transport: T,
) -> Result<(), TransportError>
where
    T: NotificationTransport,
{
    let events = registry.register(LIBNOTIFY_NOTIFIER, config.queue_capacity);
    serve(registry, events, NotificationPayload::from(config), transport).await
}

/// Registers the queue, then runs the notifier on a new task.
///
/// Events published after this returns are queued even if the task has not
/// connected yet.
pub fn spawn_libnotify_notifier<T>(
    registry: NotifierRegistry,
    config: &NotifierConfig,
    transport: T,
) -> JoinHandle<Result<(), TransportError>>
where
    T: NotificationTransport + 'static,
{
    let events = registry.register(LIBNOTIFY_NOTIFIER, config.queue_capacity);
    let payload = NotificationPayload::from(config);
    tokio::spawn(serve(registry, events, payload, transport))
}

async fn serve<T>(
    registry: NotifierRegistry,
    events: mpsc::Receiver<TouchEvent>,
    payload: NotificationPayload,
    transport: T,
) -> Result<(), TransportError>
where
    T: NotificationTransport,
{
    let controller = match NotificationController::connect(transport, payload).await {
        Ok(controller) => controller,
        Err(e) => {
            error!("Cannot initialize desktop notifications: {}", e);
            registry.unregister(LIBNOTIFY_NOTIFIER);
            return Err(e);
        }
    };
    // The queue must close once producers let go of the registry entry.
    drop(registry);

    info!("Desktop notifications ready.");
    controller.run(events).await;
    Ok(())
}

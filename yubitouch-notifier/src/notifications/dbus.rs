//! `org.freedesktop.Notifications` transport over the D-Bus session bus.
//!
//! Every [`DbusTransport::connect`] opens its own session bus connection
//! (authentication and the `Hello` call happen during the handshake), so a
//! broken connection can be dropped and replaced without affecting anything
//! else in the process.

use std::collections::HashMap;

use async_trait::async_trait;
use futures_util::stream::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use zbus::{dbus_proxy, zvariant::Value, Connection};

use super::handle::NotificationHandle;
use super::payload::NotificationPayload;
use super::transport::{NotificationSession, NotificationTransport, Result, TransportError};

/// D-Bus service name of the notification server.
pub const NOTIFICATIONS_SERVICE: &str = "org.freedesktop.Notifications";

#[dbus_proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    /// Shows or replaces a notification and returns its id.
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: &[&str],
        hints: &HashMap<&str, &Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;

    fn close_notification(&self, id: u32) -> zbus::Result<()>;

    /// Emitted when a notification is closed, for any reason
    /// (1 expired, 2 dismissed by the user, 3 closed by a call, 4 undefined).
    #[dbus_proxy(signal)]
    fn notification_closed(&self, id: u32, reason: u32) -> zbus::Result<()>;
}

/// Connects to the notification server on the session bus.
#[derive(Debug, Default, Clone, Copy)]
pub struct DbusTransport;

impl DbusTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationTransport for DbusTransport {
    async fn connect(&self, handle: NotificationHandle) -> Result<Box<dyn NotificationSession>> {
        let connection = Connection::session()
            .await
            .map_err(TransportError::ConnectionFailed)?;
        debug!(
            "Connected to D-Bus session bus as {}.",
            connection
                .unique_name()
                .map_or_else(|| "<unknown>".to_string(), |n| n.to_string())
        );

        let proxy = NotificationsProxy::new(&connection)
            .await
            .map_err(|e| TransportError::ProxyCreationFailed { source: e })?;

        let mut closed_stream = proxy
            .receive_notification_closed()
            .await
            .map_err(|e| TransportError::SignalSubscriptionFailed { source: e })?;

        let listener = tokio::spawn(async move {
            while let Some(signal) = closed_stream.next().await {
                match signal.args() {
                    Ok(args) => {
                        on_notification_closed(&handle, *args.id(), *args.reason());
                    }
                    Err(e) => warn!("Cannot decode NotificationClosed signal: {}", e),
                }
            }
            debug!("NotificationClosed stream ended.");
        });

        info!("Connected to {} on the session bus.", NOTIFICATIONS_SERVICE);
        Ok(Box::new(DbusSession {
            inner: Some(SessionInner {
                proxy,
                listener,
            }),
        }))
    }
}

/// Forgets `id` if it is the notification currently held by `handle`.
/// Signals for other notifications (ours from an earlier show, or another
/// application's) leave the handle alone.
fn on_notification_closed(handle: &NotificationHandle, id: u32, reason: u32) -> bool {
    let released = handle.release(id);
    if released {
        debug!("Notification {} closed by the server (reason {}).", id, reason);
    }
    released
}

struct SessionInner {
    // The proxy owns the connection; dropping it disconnects.
    proxy: NotificationsProxy<'static>,
    listener: JoinHandle<()>,
}

/// One connection to the notification server plus its dismissal listener.
pub struct DbusSession {
    inner: Option<SessionInner>,
}

impl DbusSession {
    fn inner(&self) -> Result<&SessionInner> {
        self.inner.as_ref().ok_or(TransportError::SessionUnavailable)
    }
}

#[async_trait]
impl NotificationSession for DbusSession {
    async fn show(&self, payload: &NotificationPayload, replaces_id: u32) -> Result<u32> {
        let inner = self.inner()?;
        let hints: HashMap<&str, &Value<'_>> = HashMap::new();
        inner
            .proxy
            .notify(
                &payload.app_name,
                replaces_id,
                &payload.app_icon,
                &payload.summary,
                &payload.body,
                &[],
                &hints,
                payload.expire_timeout,
            )
            .await
            .map_err(|e| TransportError::NotifyFailed { source: e })
    }

    async fn close(&self, id: u32) -> Result<()> {
        self.inner()?
            .proxy
            .close_notification(id)
            .await
            .map_err(|e| TransportError::CloseFailed { id, source: e })
    }

    async fn shutdown(&mut self) {
        if let Some(inner) = self.inner.take() {
            inner.listener.abort();
            debug!("D-Bus notification session shut down.");
        }
    }
}

impl Drop for DbusSession {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.take() {
            inner.listener.abort();
        }
    }
}

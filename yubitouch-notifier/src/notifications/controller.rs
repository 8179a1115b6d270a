//! Keeps the desktop notification in line with the touch state.
//!
//! The controller consumes touch events one at a time, asks the
//! [`TouchAggregator`] whether the notification should be visible and drives
//! the current [`NotificationSession`] accordingly. A failing session is
//! replaced by a fresh one; a failed show is retried once on the new session.

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use yubitouch_core::TouchEvent;

use super::aggregator::{TouchAggregator, Visibility};
use super::handle::NotificationHandle;
use super::payload::NotificationPayload;
use super::transport::{NotificationSession, NotificationTransport, Result, TransportError};

/// Outcome of applying one decision to the notification service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The call succeeded on the current session.
    Delivered,
    /// The call failed, the session was replaced and the retry succeeded.
    DeliveredAfterReconnect,
    /// The update did not reach the service. The next event tries again.
    Dropped,
    /// Nothing to do: hiding while no notification is shown.
    Skipped,
}

/// Drives one notification through one transport.
///
/// Owns the aggregator and the session; only the [`NotificationHandle`] is
/// shared, with the session's dismissal listener. One controller per session.
pub struct NotificationController<T: NotificationTransport> {
    transport: T,
    session: Option<Box<dyn NotificationSession>>,
    aggregator: TouchAggregator,
    handle: NotificationHandle,
    payload: NotificationPayload,
}

impl<T: NotificationTransport> NotificationController<T> {
    /// Opens the initial session.
    ///
    /// A failure here is returned to the caller; no retry is attempted.
    pub async fn connect(transport: T, payload: NotificationPayload) -> Result<Self> {
        let handle = NotificationHandle::new();
        let session = transport.connect(handle.clone()).await?;
        Ok(Self {
            transport,
            session: Some(session),
            aggregator: TouchAggregator::new(),
            handle,
            payload,
        })
    }

    /// Processes events until every sender of `events` is dropped, then closes
    /// a notification still on screen and shuts the session down.
    pub async fn run(mut self, mut events: mpsc::Receiver<TouchEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        info!("Touch event queue closed, stopping desktop notifications.");
        self.close_remaining().await;
        self.shutdown().await;
    }

    /// Best-effort close of a notification still on screen, so it does not
    /// outlive the process. Failures are only logged.
    async fn close_remaining(&mut self) {
        let (Some(id), Some(session)) = (self.handle.get(), self.session.as_ref()) else {
            return;
        };
        match session.close(id).await {
            Ok(()) => {
                self.handle.release(id);
                debug!("Closed notification {} on exit.", id);
            }
            Err(e) => warn!("Cannot close notification {} on exit: {}", id, e),
        }
    }

    /// Applies one event and returns what happened to the notification.
    pub async fn handle_event(&mut self, event: TouchEvent) -> Delivery {
        let decision = self.aggregator.apply(event);
        debug!(
            "Touch event {} -> {:?} ({} pending).",
            event,
            decision,
            self.aggregator.active()
        );
        match decision {
            Visibility::Visible => self.show().await,
            Visibility::Hidden => self.hide().await,
        }
    }

    /// Shows or refreshes the notification, retrying once on a fresh session.
    async fn show(&mut self) -> Delivery {
        match self.try_show().await {
            Ok(()) => return Delivery::Delivered,
            Err(e) => error!("Cannot show notification (will reconnect to D-Bus): {}", e),
        }

        if !self.reconnect().await {
            return Delivery::Dropped;
        }

        match self.try_show().await {
            Ok(()) => Delivery::DeliveredAfterReconnect,
            Err(e) => {
                error!("Cannot show notification after reconnect: {}", e);
                Delivery::Dropped
            }
        }
    }

    async fn try_show(&mut self) -> Result<()> {
        let session = self.session.as_ref().ok_or(TransportError::SessionUnavailable)?;
        let id = session.show(&self.payload, self.handle.replaces_id()).await?;
        // Keep the first id: later calls only update that notification.
        self.handle.claim(id);
        Ok(())
    }

    /// Closes the notification if one is shown. A failed close is not retried;
    /// the session is replaced instead.
    async fn hide(&mut self) -> Delivery {
        let Some(id) = self.handle.get() else {
            return Delivery::Skipped;
        };

        let result = match self.session.as_ref() {
            Some(session) => session.close(id).await,
            None => Err(TransportError::SessionUnavailable),
        };

        match result {
            Ok(()) => {
                self.handle.release(id);
                Delivery::Delivered
            }
            Err(e) => {
                error!("Cannot close notification (will reconnect to D-Bus): {}", e);
                self.reconnect().await;
                Delivery::Dropped
            }
        }
    }

    /// Replaces the session. The handle is cleared either way: ids issued by
    /// the old session mean nothing to the new one.
    async fn reconnect(&mut self) -> bool {
        self.shutdown().await;

        warn!("Reconnecting to the notification service.");
        match self.transport.connect(self.handle.clone()).await {
            Ok(session) => {
                self.session = Some(session);
                info!("Reconnected to the notification service.");
                true
            }
            Err(e) => {
                error!("Failed to reconnect: {}", e);
                false
            }
        }
    }

    /// Shuts the current session down, if any, and forgets the notification id.
    pub async fn shutdown(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.shutdown().await;
        }
        self.handle.clear();
    }

    pub fn handle(&self) -> &NotificationHandle {
        &self.handle
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }
}

//! Seam between the controller and the notification service.
//!
//! A [`NotificationTransport`] opens [`NotificationSession`]s. The controller
//! owns at most one session at a time and replaces it wholesale on failure.

use async_trait::async_trait;
use thiserror::Error;

use super::handle::NotificationHandle;
use super::payload::NotificationPayload;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("D-Bus connection failed: {0}")]
    ConnectionFailed(#[source] zbus::Error),

    #[error("Failed to create notifications proxy: {source}")]
    ProxyCreationFailed {
        #[source]
        source: zbus::Error,
    },

    #[error("Failed to subscribe to NotificationClosed: {source}")]
    SignalSubscriptionFailed {
        #[source]
        source: zbus::Error,
    },

    #[error("Notify call failed: {source}")]
    NotifyFailed {
        #[source]
        source: zbus::Error,
    },

    #[error("CloseNotification call failed for id {id}: {source}")]
    CloseFailed {
        id: u32,
        #[source]
        source: zbus::Error,
    },

    #[error("No notification session is connected")]
    SessionUnavailable,
}

pub type Result<T> = std::result::Result<T, TransportError>;

/// Factory for sessions with the notification service.
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    /// Opens a new session.
    ///
    /// The session watches for notifications dismissed by the service and
    /// releases `handle` when the dismissed id is the one it holds.
    async fn connect(&self, handle: NotificationHandle) -> Result<Box<dyn NotificationSession>>;
}

/// A live connection to the notification service.
#[async_trait]
pub trait NotificationSession: Send + Sync {
    /// Shows `payload`, replacing notification `replaces_id` (0 creates a new
    /// one). Returns the id assigned by the service.
    async fn show(&self, payload: &NotificationPayload, replaces_id: u32) -> Result<u32>;

    /// Closes notification `id`.
    async fn close(&self, id: u32) -> Result<()>;

    /// Releases the connection and stops the dismissal listener.
    /// Calling it more than once is harmless.
    async fn shutdown(&mut self);
}

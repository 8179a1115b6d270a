//! System layer of yubitouch: the notification controller, its D-Bus
//! transport, the registry through which producers reach it and the textual
//! event input.

pub mod feed;
pub mod notifications;
pub mod registry;
pub mod service;

pub use notifications::{
    DbusTransport, Delivery, NotificationController, NotificationHandle, NotificationPayload,
    NotificationSession, NotificationTransport, TransportError,
};
pub use registry::NotifierRegistry;
pub use service::{run_libnotify_notifier, spawn_libnotify_notifier, LIBNOTIFY_NOTIFIER};

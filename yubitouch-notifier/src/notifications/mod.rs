//! Desktop notification shown while a key waits for a touch.

pub mod aggregator;
pub mod controller;
pub mod dbus;
pub mod handle;
pub mod payload;
pub mod transport;

pub use aggregator::{TouchAggregator, Visibility};
pub use controller::{Delivery, NotificationController};
pub use dbus::{DbusSession, DbusTransport};
pub use handle::NotificationHandle;
pub use payload::NotificationPayload;
pub use transport::{NotificationSession, NotificationTransport, TransportError};

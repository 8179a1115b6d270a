//! Named event queues of the running notifiers.
//!
//! Each notifier registers the sender half of its bounded queue under its
//! component name. Producers either look a queue up by name or call
//! [`NotifierRegistry::publish`] to hand an event to every notifier.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use yubitouch_core::TouchEvent;

/// Shared map from component name to event queue. Cloning is cheap; all
/// clones see the same entries.
#[derive(Debug, Clone, Default)]
pub struct NotifierRegistry {
    queues: Arc<RwLock<HashMap<String, mpsc::Sender<TouchEvent>>>>,
}

impl NotifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a queue for `name` and returns its receiving half.
    ///
    /// # Arguments
    ///
    /// * `name` - Component name, e.g. `notifier/libnotify`
    /// * `capacity` - Number of events buffered before producers wait; raised
    ///   to 1 if zero
    pub fn register(&self, name: &str, capacity: usize) -> mpsc::Receiver<TouchEvent> {
        let capacity = if capacity == 0 {
            warn!("Queue capacity 0 for notifier '{}' raised to 1.", name);
            1
        } else {
            capacity
        };
        let (tx, rx) = mpsc::channel(capacity);
        if self.queues.write().insert(name.to_string(), tx).is_some() {
            warn!("Notifier '{}' registered twice; the previous queue is closed.", name);
        }
        debug!("Registered notifier '{}' (capacity {}).", name, capacity);
        rx
    }

    /// Sender for the queue registered under `name`, if any.
    pub fn sender(&self, name: &str) -> Option<mpsc::Sender<TouchEvent>> {
        self.queues.read().get(name).cloned()
    }

    /// Removes `name`. Its notifier stops once every other sender is gone.
    pub fn unregister(&self, name: &str) -> bool {
        let removed = self.queues.write().remove(name).is_some();
        if removed {
            debug!("Unregistered notifier '{}'.", name);
        }
        removed
    }

    /// Sends `event` to every registered notifier, waiting for queue space.
    ///
    /// Returns the number of notifiers that accepted it. A queue whose
    /// receiver is gone is logged and skipped.
    pub async fn publish(&self, event: TouchEvent) -> usize {
        let targets: Vec<(String, mpsc::Sender<TouchEvent>)> = self
            .queues
            .read()
            .iter()
            .map(|(name, tx)| (name.clone(), tx.clone()))
            .collect();

        let mut delivered = 0;
        for (name, tx) in targets {
            match tx.send(event).await {
                Ok(()) => delivered += 1,
                Err(_) => warn!("Notifier '{}' is no longer running; dropping {}.", name, event),
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_every_notifier() {
        let registry = NotifierRegistry::new();
        let mut first = registry.register("notifier/first", 4);
        let mut second = registry.register("notifier/second", 4);

        assert_eq!(registry.publish(TouchEvent::GpgOn).await, 2);
        assert_eq!(first.recv().await, Some(TouchEvent::GpgOn));
        assert_eq!(second.recv().await, Some(TouchEvent::GpgOn));
    }

    #[tokio::test]
    async fn sender_lookup_by_name() {
        let registry = NotifierRegistry::new();
        let mut rx = registry.register("notifier/libnotify", 10);

        let tx = registry.sender("notifier/libnotify").unwrap();
        tx.send(TouchEvent::U2fOff).await.unwrap();
        assert_eq!(rx.recv().await, Some(TouchEvent::U2fOff));

        assert!(registry.sender("notifier/unknown").is_none());
    }

    #[tokio::test]
    async fn unregister_closes_queue() {
        let registry = NotifierRegistry::new();
        let mut rx = registry.register("notifier/libnotify", 10);

        assert!(registry.unregister("notifier/libnotify"));
        assert!(!registry.unregister("notifier/libnotify"));
        assert!(registry.sender("notifier/libnotify").is_none());
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn publish_skips_stopped_notifiers() {
        let registry = NotifierRegistry::new();
        let stopped = registry.register("notifier/stopped", 1);
        let mut running = registry.register("notifier/running", 1);
        drop(stopped);

        assert_eq!(registry.publish(TouchEvent::HmacOn).await, 1);
        assert_eq!(running.recv().await, Some(TouchEvent::HmacOn));
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let registry = NotifierRegistry::new();
        let clone = registry.clone();
        let _rx = registry.register("notifier/libnotify", 10);

        assert!(clone.sender("notifier/libnotify").is_some());
        assert!(clone.unregister("notifier/libnotify"));
        assert!(registry.sender("notifier/libnotify").is_none());
    }

    #[tokio::test]
    async fn zero_capacity_queue_still_buffers_one_event() {
        let registry = NotifierRegistry::new();
        let mut rx = registry.register("notifier/libnotify", 0);

        let tx = registry.sender("notifier/libnotify").unwrap();
        tx.try_send(TouchEvent::GpgOn).unwrap();
        assert!(tx.try_send(TouchEvent::GpgOff).is_err());
        assert_eq!(rx.recv().await, Some(TouchEvent::GpgOn));
    }

    #[tokio::test]
    async fn re_registering_replaces_the_queue() {
        let registry = NotifierRegistry::new();
        let mut old = registry.register("notifier/libnotify", 10);
        let mut new = registry.register("notifier/libnotify", 10);

        assert_eq!(old.recv().await, None);
        registry.publish(TouchEvent::GpgOff).await;
        assert_eq!(new.recv().await, Some(TouchEvent::GpgOff));
    }
}

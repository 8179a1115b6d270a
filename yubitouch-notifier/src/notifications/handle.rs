//! Identity of the notification currently on screen.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Id meaning "no notification shown". The notification server never hands it out.
pub const NO_NOTIFICATION: u32 = 0;

/// Shared cell holding the id of the visible notification.
///
/// Written by the controller (after show, close and reconnect) and by the
/// dismissal listener of a transport session, which runs on its own task.
/// Every conditional write is a compare-and-swap so neither writer has to
/// wait for the other. Clones share the same cell.
#[derive(Debug, Clone, Default)]
pub struct NotificationHandle {
    id: Arc<AtomicU32>,
}

impl NotificationHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current id, or `None` when nothing is shown.
    pub fn get(&self) -> Option<u32> {
        match self.id.load(Ordering::Acquire) {
            NO_NOTIFICATION => None,
            id => Some(id),
        }
    }

    /// The id to pass as `replaces_id`: the current id, or 0 for a new notification.
    pub fn replaces_id(&self) -> u32 {
        self.id.load(Ordering::Acquire)
    }

    /// Records `id` as the visible notification if none is recorded yet.
    ///
    /// Returns `true` if the handle was empty and now holds `id`. An existing
    /// id is kept, so repeated updates never change the notification identity.
    pub fn claim(&self, id: u32) -> bool {
        id != NO_NOTIFICATION
            && self
                .id
                .compare_exchange(NO_NOTIFICATION, id, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
    }

    /// Clears the handle only if it still holds `id`.
    ///
    /// A dismissal or close for a notification that has since been replaced
    /// leaves the newer id in place. Returns `true` if the handle was cleared.
    pub fn release(&self, id: u32) -> bool {
        id != NO_NOTIFICATION
            && self
                .id
                .compare_exchange(id, NO_NOTIFICATION, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
    }

    /// Unconditionally forgets the current id. Used when the session that
    /// issued it is torn down.
    pub fn clear(&self) -> Option<u32> {
        match self.id.swap(NO_NOTIFICATION, Ordering::AcqRel) {
            NO_NOTIFICATION => None,
            id => Some(id),
        }
    }
}

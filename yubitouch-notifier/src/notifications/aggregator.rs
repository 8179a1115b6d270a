//! Folds touch events from every source into one show/hide decision.

use tracing::{debug, warn};
use yubitouch_core::TouchEvent;

/// Whether the touch notification should be on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Counts outstanding touch requests across all sources.
///
/// GPG, U2F and HMAC requests share a single counter: the user only needs to
/// know that *something* waits for a touch, so overlapping requests yield one
/// notification. The counter is clamped at zero; an OFF without a matching ON
/// is logged and ignored, so it can never delay hiding a later request.
#[derive(Debug, Default)]
pub struct TouchAggregator {
    active: u32,
}

impl TouchAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one event and returns the resulting decision.
    pub fn apply(&mut self, event: TouchEvent) -> Visibility {
        let source = event.source();
        if event.is_on() {
            self.active = self.active.saturating_add(1);
            debug!("{:?} touch requested ({} pending).", source, self.active);
        } else if self.active == 0 {
            warn!("Ignoring {} from {:?} without a pending touch request.", event, source);
        } else {
            self.active -= 1;
            debug!("{:?} touch request done ({} pending).", source, self.active);
        }
        self.visibility()
    }

    pub fn visibility(&self) -> Visibility {
        if self.active > 0 {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }

    /// Number of outstanding touch requests.
    pub fn active(&self) -> u32 {
        self.active
    }
}

//! Content of the touch notification.

use yubitouch_core::config::NotifierConfig;

/// The notification sent for every touch request.
///
/// Built once at startup; identical for every show call and never
/// parameterized by the source of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPayload {
    pub app_name: String,
    pub app_icon: String,
    pub summary: String,
    pub body: String,
    /// Milliseconds; `-1` for the server default, `0` to never expire.
    pub expire_timeout: i32,
}

impl From<&NotifierConfig> for NotificationPayload {
    fn from(config: &NotifierConfig) -> Self {
        Self {
            app_name: config.app_name.clone(),
            app_icon: config.app_icon.clone(),
            summary: config.summary.clone(),
            body: config.body.clone(),
            expire_timeout: config.expire_timeout_ms,
        }
    }
}

impl Default for NotificationPayload {
    fn default() -> Self {
        Self::from(&NotifierConfig::default())
    }
}

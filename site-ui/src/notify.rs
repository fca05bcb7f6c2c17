//! Notifications delivered through the log.
//!
//! The dashboard has no toast area, so every notification becomes one log
//! event: successes at `info`, errors at `warn`.

use site_core::{Notification, NotificationLevel, Notifier};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(
        &self,
        notification: &Notification,
    ) {
        match notification.level {
            NotificationLevel::Success => {
                info!(title = %notification.title, "{}", notification.description)
            }
            NotificationLevel::Error => {
                warn!(title = %notification.title, "{}", notification.description)
            }
        }
    }
}

//! No-op notifier for when notifications are disabled

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

/// Notifier that only logs
pub struct NoOpNotifier;

impl NoOpNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NoOpNotifier {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        _icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        debug!(title, message, "notification suppressed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_always_succeeds() {
        let notifier = NoOpNotifier::new();
        let result = notifier
            .notify("EuroListener", "There is no record", NotificationIcon::Error)
            .await;
        assert!(result.is_ok());
    }
}

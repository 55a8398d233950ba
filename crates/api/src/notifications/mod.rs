//! [`Notifier`] transports.
//!
//! - [`email::EmailNotifier`] -- SMTP delivery, used when `SMTP_HOST` is set.
//! - [`LogNotifier`] -- writes the message to the log instead; the
//!   development fallback.

pub mod email;

use async_trait::async_trait;
use worktrack_core::notification::{NotificationError, Notifier};

/// Logs every message at `info` and always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError> {
        tracing::info!(to = recipient, subject, body, "SMTP not configured, notification logged");
        Ok(())
    }
}

//! Outbound notification seam.
//!
//! The feedback workflow only needs "send this message to this address,
//! synchronously, and tell me if it failed". Transports live in the API
//! crate; tests plug in recording or failing doubles.

use async_trait::async_trait;

/// Delivery failure. Fatal to whatever operation triggered the send.
#[derive(Debug, thiserror::Error)]
#[error("Notification delivery failed: {0}")]
pub struct NotificationError(pub String);

/// Sends a plain-text message to a single recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str)
        -> Result<(), NotificationError>;
}

//! Message sink implementations.

pub mod webhook;

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::message::SlackMessage;

/// Destination that accepts one message per call.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Get the name of this sink.
    fn name(&self) -> &'static str;

    /// Deliver a single message. Returns once the attempt has completed.
    async fn deliver(&self, message: &SlackMessage) -> Result<(), NotifyError>;
}

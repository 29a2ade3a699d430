use async_trait::async_trait;

use crate::{EvaluatorId, MessageHandle, Result};

/// Abstraction over the notification channel.
///
/// `TelegramNotifier` implements this for live delivery.
/// `ConsoleNotifier` implements this for dry runs.
///
/// The scheduler is the only caller. It logs and swallows every error so a
/// delivery failure can never stall the cycle clock.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a text message (HTML bold markup allowed) and return a
    /// handle for later retraction.
    async fn send(&self, text: &str) -> Result<MessageHandle>;

    /// Deliver a message with the evaluator's image attached, falling back
    /// to plain text when no image resource exists for that evaluator.
    async fn send_with_image(&self, evaluator: EvaluatorId, caption: &str)
        -> Result<MessageHandle>;

    /// Retract a previously delivered message.
    async fn delete(&self, handle: MessageHandle) -> Result<()>;
}

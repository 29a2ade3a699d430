use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use tracing::{debug, info};

use common::{EvaluatorId, MessageHandle, Notifier, Result};

/// Log-only notifier for dry runs.
///
/// Every payload lands in the process log instead of a Telegram chat, so
/// evaluators and cycle timing can be watched without a bot token or a
/// chat to spam. Handles are synthetic and retraction is a no-op.
pub struct ConsoleNotifier {
    next_handle: AtomicI32,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self {
            next_handle: AtomicI32::new(1),
        }
    }

    fn allocate(&self) -> MessageHandle {
        MessageHandle(self.next_handle.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn send(&self, text: &str) -> Result<MessageHandle> {
        let handle = self.allocate();
        info!(handle = handle.0, "Notification:\n{text}");
        Ok(handle)
    }

    async fn send_with_image(
        &self,
        evaluator: EvaluatorId,
        caption: &str,
    ) -> Result<MessageHandle> {
        let handle = self.allocate();
        info!(handle = handle.0, image = %evaluator.image_file(), "Notification:\n{caption}");
        Ok(handle)
    }

    async fn delete(&self, handle: MessageHandle) -> Result<()> {
        debug!(handle = handle.0, "Retracted notification");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn console_handles_are_unique_and_increasing() {
        let notifier = ConsoleNotifier::new();
        let a = notifier.send("first").await.unwrap();
        let b = notifier.send_with_image(EvaluatorId::V1, "second").await.unwrap();
        let c = notifier.send("third").await.unwrap();
        assert!(a.0 < b.0 && b.0 < c.0);
    }

    #[tokio::test]
    async fn console_delete_always_succeeds() {
        let notifier = ConsoleNotifier::new();
        let handle = notifier.send("gone soon").await.unwrap();
        assert!(notifier.delete(handle).await.is_ok());
        // Deleting twice is still fine; handles are not tracked
        assert!(notifier.delete(handle).await.is_ok());
    }
}

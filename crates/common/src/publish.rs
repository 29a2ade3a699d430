use async_trait::async_trait;

use crate::{Result, StatusRecord};

/// Abstraction over durable signal-state publication.
///
/// `FileStatusPublisher` implements this by writing `signals.json` and
/// best-effort syncing it to a git remote.
#[async_trait]
pub trait StatusPublisher: Send + Sync {
    /// Persist the latest signal state.
    async fn publish(&self, record: &StatusRecord) -> Result<()>;
}

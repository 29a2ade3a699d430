use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use common::{Error, Result, StatusPublisher, StatusRecord};

/// Commit message used for every status change.
const SYNC_COMMIT_MESSAGE: &str = "auto update signal";

/// Writes each status record to a JSON file and best-effort syncs it to
/// the `main` branch of the repository containing it.
///
/// The landing page reads the pushed file, so the write happens first and
/// unconditionally. Sync failures (no repo, no remote, rejected push) are
/// logged and never surfaced to the scheduler.
pub struct FileStatusPublisher {
    path: PathBuf,
    git_sync: bool,
}

impl FileStatusPublisher {
    pub fn new(path: impl Into<PathBuf>, git_sync: bool) -> Self {
        Self {
            path: path.into(),
            git_sync,
        }
    }

    async fn sync_to_git(&self) -> Result<()> {
        let path = self.path.to_string_lossy().into_owned();

        let porcelain = run_git(&["status", "--porcelain", &path]).await?;
        if porcelain.trim().is_empty() {
            debug!("Status file unchanged, skipping git sync");
            return Ok(());
        }

        run_git(&["add", &path]).await?;
        // Commit exits non-zero when there is nothing new to commit
        if let Err(e) = run_git(&["commit", "-m", SYNC_COMMIT_MESSAGE]).await {
            debug!(error = %e, "git commit skipped");
        }
        run_git(&["push", "origin", "main"]).await?;
        info!("Status file pushed to remote");
        Ok(())
    }
}

/// Run one git subcommand, returning stdout. Non-zero exit is an error.
async fn run_git(args: &[&str]) -> Result<String> {
    let output = Command::new("git").args(args).output().await?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Sync(format!(
            "git {} failed: {}",
            args[0],
            stderr.trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[async_trait]
impl StatusPublisher for FileStatusPublisher {
    async fn publish(&self, record: &StatusRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;
        tokio::fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), "Status file written");

        if self.git_sync {
            if let Err(e) = self.sync_to_git().await {
                warn!(error = %e, "Git sync failed");
            }
        }
        Ok(())
    }
}

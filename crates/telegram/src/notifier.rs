use std::path::PathBuf;

use async_trait::async_trait;
use teloxide::payloads::{SendMessageSetters, SendPhotoSetters};
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, MessageId, ParseMode};
use tracing::debug;

use common::{Error, EvaluatorId, MessageHandle, Notifier, Result};

/// Delivers notifications to a single Telegram chat.
///
/// Texts and captions go out in HTML parse mode (the bold subset the
/// scheduler emits). Signal posts attach `<image_dir>/<id>.png` when that
/// file exists and fall back to plain text otherwise, so a missing image
/// never blocks a signal.
pub struct TelegramNotifier {
    bot: Bot,
    chat: ChatId,
    image_dir: PathBuf,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>, chat_id: i64, image_dir: impl Into<PathBuf>) -> Self {
        Self {
            bot: Bot::new(token.into()),
            chat: ChatId(chat_id),
            image_dir: image_dir.into(),
        }
    }

    fn image_path(&self, evaluator: EvaluatorId) -> PathBuf {
        self.image_dir.join(evaluator.image_file())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<MessageHandle> {
        let message = self
            .bot
            .send_message(self.chat, text)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|e| Error::Telegram(e.to_string()))?;
        Ok(MessageHandle(message.id.0))
    }

    async fn send_with_image(
        &self,
        evaluator: EvaluatorId,
        caption: &str,
    ) -> Result<MessageHandle> {
        let path = self.image_path(evaluator);
        if !path.exists() {
            debug!(evaluator = %evaluator, path = %path.display(), "No image resource, sending plain text");
            return self.send(caption).await;
        }

        let message = self
            .bot
            .send_photo(self.chat, InputFile::file(path))
            .caption(caption)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|e| Error::Telegram(e.to_string()))?;
        Ok(MessageHandle(message.id.0))
    }

    async fn delete(&self, handle: MessageHandle) -> Result<()> {
        self.bot
            .delete_message(self.chat, MessageId(handle.0))
            .await
            .map_err(|e| Error::Telegram(e.to_string()))?;
        Ok(())
    }
}

use async_trait::async_trait;
use teloxide::payloads::{
    SendAudioSetters, SendDocumentSetters, SendPhotoSetters, SendVideoSetters, SendVoiceSetters,
};
use teloxide::prelude::*;
use teloxide::types::{ChatId, FileId, InputFile, MessageId};

use crate::error::RelayError;

/// The messaging-platform capability set the relay core depends on.
///
/// `TelegramGateway` is the production implementation; router tests
/// substitute a recording mock so both relay directions can be driven
/// without the network.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Forward an existing message into another chat, returning the id the
    /// copy received there.
    async fn forward_message(
        &self,
        to: ChatId,
        from: ChatId,
        message: MessageId,
    ) -> Result<MessageId, RelayError>;

    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), RelayError>;

    async fn send_photo(
        &self,
        chat: ChatId,
        file: FileId,
        caption: Option<&str>,
    ) -> Result<(), RelayError>;

    async fn send_video(
        &self,
        chat: ChatId,
        file: FileId,
        caption: Option<&str>,
    ) -> Result<(), RelayError>;

    async fn send_document(
        &self,
        chat: ChatId,
        file: FileId,
        caption: Option<&str>,
    ) -> Result<(), RelayError>;

    async fn send_audio(
        &self,
        chat: ChatId,
        file: FileId,
        caption: Option<&str>,
    ) -> Result<(), RelayError>;

    async fn send_voice(
        &self,
        chat: ChatId,
        file: FileId,
        caption: Option<&str>,
    ) -> Result<(), RelayError>;

    async fn send_sticker(&self, chat: ChatId, file: FileId) -> Result<(), RelayError>;
}

/// Telegram implementation over a shared `Bot` client.
pub struct TelegramGateway {
    bot: Bot,
}

impl TelegramGateway {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Gateway for TelegramGateway {
    async fn forward_message(
        &self,
        to: ChatId,
        from: ChatId,
        message: MessageId,
    ) -> Result<MessageId, RelayError> {
        let forwarded = self.bot.forward_message(to, from, message).await?;
        Ok(forwarded.id)
    }

    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), RelayError> {
        self.bot.send_message(chat, text).await?;
        Ok(())
    }

    async fn send_photo(
        &self,
        chat: ChatId,
        file: FileId,
        caption: Option<&str>,
    ) -> Result<(), RelayError> {
        let mut req = self.bot.send_photo(chat, InputFile::file_id(file));
        if let Some(caption) = caption {
            req = req.caption(caption);
        }
        req.await?;
        Ok(())
    }

    async fn send_video(
        &self,
        chat: ChatId,
        file: FileId,
        caption: Option<&str>,
    ) -> Result<(), RelayError> {
        let mut req = self.bot.send_video(chat, InputFile::file_id(file));
        if let Some(caption) = caption {
            req = req.caption(caption);
        }
        req.await?;
        Ok(())
    }

    async fn send_document(
        &self,
        chat: ChatId,
        file: FileId,
        caption: Option<&str>,
    ) -> Result<(), RelayError> {
        let mut req = self.bot.send_document(chat, InputFile::file_id(file));
        if let Some(caption) = caption {
            req = req.caption(caption);
        }
        req.await?;
        Ok(())
    }

    async fn send_audio(
        &self,
        chat: ChatId,
        file: FileId,
        caption: Option<&str>,
    ) -> Result<(), RelayError> {
        let mut req = self.bot.send_audio(chat, InputFile::file_id(file));
        if let Some(caption) = caption {
            req = req.caption(caption);
        }
        req.await?;
        Ok(())
    }

    async fn send_voice(
        &self,
        chat: ChatId,
        file: FileId,
        caption: Option<&str>,
    ) -> Result<(), RelayError> {
        let mut req = self.bot.send_voice(chat, InputFile::file_id(file));
        if let Some(caption) = caption {
            req = req.caption(caption);
        }
        req.await?;
        Ok(())
    }

    async fn send_sticker(&self, chat: ChatId, file: FileId) -> Result<(), RelayError> {
        self.bot.send_sticker(chat, InputFile::file_id(file)).await?;
        Ok(())
    }
}

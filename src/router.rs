use std::sync::Arc;

use teloxide::types::{ChatId, Message};
use tracing::{debug, warn};

use crate::classify::{classify, ReplyContent};
use crate::error::RelayError;
use crate::gateway::Gateway;
use crate::store::CorrelationStore;

/// Orchestrates the two relay directions: user message into the staff
/// group, staff reply back to the user. Stateless per invocation apart
/// from the correlation store.
pub struct Router {
    gateway: Arc<dyn Gateway>,
    store: CorrelationStore,
    group: ChatId,
    confirmation: String,
}

impl Router {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        store: CorrelationStore,
        group: ChatId,
        confirmation: String,
    ) -> Self {
        Self {
            gateway,
            store,
            group,
            confirmation,
        }
    }

    /// Forward a user's private message into the staff group, record the
    /// correlation, and confirm back to the user.
    ///
    /// Any failure aborts the remaining steps: no record is written for a
    /// failed forward and no confirmation is sent for a failed record, so
    /// the user learns of a failure only by the missing confirmation. A
    /// staff reply racing the record write in the narrow forward-then-record
    /// window resolves as a miss; no ordering is guaranteed across it.
    pub async fn forward_to_group(&self, msg: &Message) -> Result<(), RelayError> {
        let user_chat = msg.chat.id;

        let forwarded = self
            .gateway
            .forward_message(self.group, user_chat, msg.id)
            .await?;

        self.store
            .record(user_chat.0, msg.id.0, forwarded.0)
            .await?;
        debug!(
            "Recorded relay: user {} message {} -> group message {}",
            user_chat.0, msg.id.0, forwarded.0
        );

        self.gateway.send_text(user_chat, &self.confirmation).await?;
        Ok(())
    }

    /// Route a staff reply back to the user whose forwarded message it
    /// answers, re-sending it with the method matching its media kind.
    ///
    /// Non-replies, unresolvable reply targets, and unrecognized payloads
    /// are logged no-ops; only storage and platform failures are errors.
    pub async fn route_reply(&self, msg: &Message) -> Result<(), RelayError> {
        let Some(replied) = msg.reply_to_message() else {
            return Ok(());
        };
        let forwarded_id = replied.id.0;

        let Some(user_id) = self.store.resolve_user(forwarded_id).await? else {
            warn!(
                "No relay record for reply target {}; dropping reply {}",
                forwarded_id, msg.id.0
            );
            return Ok(());
        };
        let user_chat = ChatId(user_id);

        match classify(msg) {
            ReplyContent::Text(text) => self.gateway.send_text(user_chat, &text).await?,
            ReplyContent::Photo { file, caption } => {
                self.gateway
                    .send_photo(user_chat, file, caption.as_deref())
                    .await?
            }
            ReplyContent::Video { file, caption } => {
                self.gateway
                    .send_video(user_chat, file, caption.as_deref())
                    .await?
            }
            ReplyContent::Document { file, caption } => {
                self.gateway
                    .send_document(user_chat, file, caption.as_deref())
                    .await?
            }
            ReplyContent::Audio { file, caption } => {
                self.gateway
                    .send_audio(user_chat, file, caption.as_deref())
                    .await?
            }
            ReplyContent::Voice { file, caption } => {
                self.gateway
                    .send_voice(user_chat, file, caption.as_deref())
                    .await?
            }
            ReplyContent::Sticker { file } => {
                self.gateway.send_sticker(user_chat, file).await?
            }
            ReplyContent::Unknown => {
                warn!(
                    "Unrecognized payload in staff reply {}; nothing relayed",
                    msg.id.0
                );
            }
        }

        Ok(())
    }
}

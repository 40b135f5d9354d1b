use teloxide::types::{FileId, Message};

/// A staff reply reduced to what the relay needs to re-send it: the media
/// kind, a content handle, and the caption where the kind supports one.
/// Consumed by exhaustive matching in the router.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyContent {
    Text(String),
    Photo { file: FileId, caption: Option<String> },
    Video { file: FileId, caption: Option<String> },
    Document { file: FileId, caption: Option<String> },
    Audio { file: FileId, caption: Option<String> },
    Voice { file: FileId, caption: Option<String> },
    Sticker { file: FileId },
    Unknown,
}

/// Determine the media kind of an inbound message and extract its payload
/// reference. `Unknown` when no supported payload is present; callers log
/// and drop that case.
pub fn classify(msg: &Message) -> ReplyContent {
    if let Some(text) = msg.text() {
        return ReplyContent::Text(text.to_owned());
    }

    let caption = msg.caption().map(str::to_owned);

    if let Some(sizes) = msg.photo() {
        // The largest size is last in the array
        if let Some(best) = sizes.last() {
            return ReplyContent::Photo {
                file: best.file.id.clone(),
                caption,
            };
        }
    }
    if let Some(video) = msg.video() {
        return ReplyContent::Video {
            file: video.file.id.clone(),
            caption,
        };
    }
    if let Some(document) = msg.document() {
        return ReplyContent::Document {
            file: document.file.id.clone(),
            caption,
        };
    }
    if let Some(audio) = msg.audio() {
        return ReplyContent::Audio {
            file: audio.file.id.clone(),
            caption,
        };
    }
    if let Some(voice) = msg.voice() {
        return ReplyContent::Voice {
            file: voice.file.id.clone(),
            caption,
        };
    }
    if let Some(sticker) = msg.sticker() {
        return ReplyContent::Sticker {
            file: sticker.file.id.clone(),
        };
    }

    ReplyContent::Unknown
}

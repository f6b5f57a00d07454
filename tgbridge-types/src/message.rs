//! Messages and files.

use chrono::{DateTime, Utc};
#[cfg(feature = "impl-serde")]
use serde::{Deserialize, Serialize};

use crate::{ChatId, FileId, UserId};

/// A file as the remote service describes it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub struct File {
    pub id:                       FileId,
    pub size:                     i32,
    /// Local path once (partially) downloaded; empty otherwise.
    pub local_path:               String,
    pub is_downloading_completed: bool,
    pub remote_id:                String,
}

/// Message payload.  Only what the bridge needs to tell apart.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub enum MessageContent {
    Text { text: String },
    Photo { file: File, caption: String },
    Document { file: File, file_name: String, caption: String },
    Sticker { file: File, emoji: String },
    /// Anything else, by its remote type name.
    Unsupported { type_name: String },
}

/// A message in a chat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub struct Message {
    pub id:             i64,
    pub chat_id:        ChatId,
    pub sender_user_id: UserId,
    /// Unix timestamp.
    pub date:           i32,
    pub is_outgoing:    bool,
    pub content:        MessageContent,
}

impl Message {
    /// A plain-text message.
    pub fn text(id: i64, chat_id: ChatId, sender_user_id: UserId, text: impl Into<String>) -> Self {
        Self {
            id,
            chat_id,
            sender_user_id,
            date:        0,
            is_outgoing: false,
            content:     MessageContent::Text { text: text.into() },
        }
    }

    /// The message text (or caption for media messages).
    pub fn text_content(&self) -> Option<&str> {
        let s = match &self.content {
            MessageContent::Text { text }            => text,
            MessageContent::Photo { caption, .. }    => caption,
            MessageContent::Document { caption, .. } => caption,
            _ => return None,
        };
        if s.is_empty() { None } else { Some(s) }
    }

    /// `date` as a UTC timestamp; `None` if it is out of range.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::from(self.date), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_skips_empty_caption() {
        let mut m = Message::text(1, 2, 3, "hi");
        assert_eq!(m.text_content(), Some("hi"));
        m.content = MessageContent::Photo { file: File::default(), caption: String::new() };
        assert_eq!(m.text_content(), None);
        m.content = MessageContent::Sticker { file: File::default(), emoji: "x".into() };
        assert_eq!(m.text_content(), None);
    }

    #[test]
    fn sent_at_converts_unix_time() {
        let mut m = Message::text(1, 2, 3, "hi");
        m.date = 86_400;
        let at = m.sent_at().unwrap();
        assert_eq!(at.timestamp(), 86_400);
    }
}

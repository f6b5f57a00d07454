//! Chats.
//!
//! A chat is the conversation container.  Its [`ChatType`] links it to the
//! entity it represents (a user for private chats, a group otherwise); those
//! links are plain ids, never owned copies.

#[cfg(feature = "impl-serde")]
use serde::{Deserialize, Serialize};

use crate::{ChatId, GroupId, Identifiable, Message, UserId};

/// What kind of conversation a [`Chat`] is.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub enum ChatType {
    /// One-to-one chat with `user_id`.
    Private { user_id: UserId },
    /// End-to-end encrypted chat with `user_id`.
    Secret { secret_chat_id: i32, user_id: UserId },
    /// Small group.
    BasicGroup { basic_group_id: GroupId },
    /// Large group or channel.
    Supergroup { supergroup_id: GroupId, is_channel: bool },
}

/// A remote chat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub struct Chat {
    pub id:           ChatId,
    pub chat_type:    ChatType,
    pub title:        String,
    pub last_message: Option<Message>,
    pub unread_count: i32,
    /// Sort key in the chat list; `0` means the chat is not in the list.
    pub order:        i64,
}

impl Chat {
    /// A chat with the given id, type and title and no other data.
    pub fn new(id: ChatId, chat_type: ChatType, title: impl Into<String>) -> Self {
        Self {
            id,
            chat_type,
            title:        title.into(),
            last_message: None,
            unread_count: 0,
            order:        0,
        }
    }

    /// Shorthand for a private chat with `user_id`.
    pub fn private(id: ChatId, user_id: UserId, title: impl Into<String>) -> Self {
        Self::new(id, ChatType::Private { user_id }, title)
    }

    /// The counterparty of a private chat.  `None` for every other type,
    /// secret chats included.
    pub fn private_user_id(&self) -> Option<UserId> {
        match self.chat_type {
            ChatType::Private { user_id } => Some(user_id),
            _ => None,
        }
    }

    /// The basic group this chat belongs to, if it is a basic group chat.
    pub fn basic_group_id(&self) -> Option<GroupId> {
        match self.chat_type {
            ChatType::BasicGroup { basic_group_id } => Some(basic_group_id),
            _ => None,
        }
    }

    /// The supergroup this chat belongs to, if it is a supergroup chat.
    pub fn supergroup_id(&self) -> Option<GroupId> {
        match self.chat_type {
            ChatType::Supergroup { supergroup_id, .. } => Some(supergroup_id),
            _ => None,
        }
    }

    /// `true` for basic group and supergroup chats (channels included).
    pub fn is_group(&self) -> bool {
        matches!(self.chat_type, ChatType::BasicGroup { .. } | ChatType::Supergroup { .. })
    }
}

impl Identifiable for Chat {
    type Id = ChatId;
    fn id(&self) -> ChatId { self.id }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_ids_only_for_matching_type() {
        let basic = Chat::new(-10, ChatType::BasicGroup { basic_group_id: 42 }, "g");
        assert_eq!(basic.basic_group_id(), Some(42));
        assert_eq!(basic.supergroup_id(), None);
        assert!(basic.is_group());

        let sg = Chat::new(-20, ChatType::Supergroup { supergroup_id: 7, is_channel: true }, "c");
        assert_eq!(sg.supergroup_id(), Some(7));
        assert_eq!(sg.basic_group_id(), None);

        let private = Chat::private(5, 77, "p");
        assert_eq!(private.private_user_id(), Some(77));
        assert_eq!(private.basic_group_id(), None);
        assert!(!private.is_group());
    }

    #[test]
    fn secret_chat_is_not_private() {
        let c = Chat::new(9, ChatType::Secret { secret_chat_id: 1, user_id: 77 }, "s");
        assert_eq!(c.private_user_id(), None);
    }
}

//! Remote chat id ↔ local chat id translation.
//!
//! Local ids are small, dense handles for the host layer.  They are handed out
//! in first-seen order and never reused for the lifetime of the map.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tgbridge_types::ChatId;

use crate::errors::AccountError;

// ─── LocalChatId ──────────────────────────────────────────────────────────────

/// Host-facing chat handle assigned by the account store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocalChatId(pub i32);

impl LocalChatId {
    pub fn get(self) -> i32 { self.0 }
}

impl fmt::Display for LocalChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<LocalChatId> for i32 {
    fn from(id: LocalChatId) -> Self { id.0 }
}

// ─── LocalIdMap ───────────────────────────────────────────────────────────────

/// Bidirectional map plus the allocation counter.
#[derive(Debug)]
pub(crate) struct LocalIdMap {
    by_remote: BTreeMap<ChatId, LocalChatId>,
    by_local:  BTreeMap<LocalChatId, ChatId>,
    // `None` once `i32::MAX` has been handed out.
    next:      Option<i32>,
}

impl LocalIdMap {
    /// `first` below 1 is clamped to 1.
    pub(crate) fn new(first: i32) -> Self {
        Self {
            by_remote: BTreeMap::new(),
            by_local:  BTreeMap::new(),
            next:      Some(first.max(1)),
        }
    }

    pub(crate) fn local(&self, chat_id: ChatId) -> Option<LocalChatId> {
        self.by_remote.get(&chat_id).copied()
    }

    pub(crate) fn remote(&self, local: LocalChatId) -> Option<ChatId> {
        self.by_local.get(&local).copied()
    }

    /// Existing local id for `chat_id`, or a freshly allocated one.
    ///
    /// Returns `(id, newly_assigned)`.  Refuses to overwrite a local id that is
    /// already paired with another chat.
    pub(crate) fn get_or_assign(&mut self, chat_id: ChatId) -> Result<(LocalChatId, bool), AccountError> {
        if let Some(id) = self.local(chat_id) {
            return Ok((id, false));
        }
        let next = self.next.ok_or(AccountError::LocalIdsExhausted)?;
        let id = LocalChatId(next);
        if let Some(&owner) = self.by_local.get(&id) {
            debug_assert_ne!(owner, chat_id);
            return Err(AccountError::DuplicateLocalId { chat_id, local_id: id });
        }
        self.next = next.checked_add(1);
        self.by_remote.insert(chat_id, id);
        self.by_local.insert(id, chat_id);
        Ok((id, true))
    }

    #[cfg(test)]
    fn len(&self) -> usize { self.by_remote.len() }

    #[cfg(test)]
    fn force_pair(&mut self, chat_id: ChatId, id: LocalChatId) {
        self.by_remote.insert(chat_id, id);
        self.by_local.insert(id, chat_id);
    }
}

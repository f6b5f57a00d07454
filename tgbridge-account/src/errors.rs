//! Error types for tgbridge-account.
//!
//! Lookups never fail: an unknown id is `None`.  The variants here are the
//! conditions that mean a caller (or the store itself) is broken.

use std::fmt;

use tgbridge_types::ChatId;

use crate::local_id::LocalChatId;
use crate::requests::RequestKind;

// ─── AccountError ─────────────────────────────────────────────────────────────

/// A broken invariant detected by the account store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountError {
    /// A response handler asked for one request kind but the id holds another.
    /// The entry is consumed regardless.
    RequestTypeMismatch {
        request_id: u64,
        expected:   RequestKind,
        found:      RequestKind,
    },
    /// `register` was called with an id that is still outstanding.
    DuplicateRequestId {
        request_id: u64,
    },
    /// Assigning a local id would have overwritten an existing pairing.
    DuplicateLocalId {
        chat_id:  ChatId,
        local_id: LocalChatId,
    },
    /// The local id counter ran out of room.
    LocalIdsExhausted,
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestTypeMismatch { request_id, expected, found } =>
                write!(f, "request {request_id}: expected {expected} context, found {found} context"),
            Self::DuplicateRequestId { request_id } =>
                write!(f, "request {request_id} is already outstanding"),
            Self::DuplicateLocalId { chat_id, local_id } =>
                write!(f, "local id {local_id} is already taken (while adding chat {chat_id})"),
            Self::LocalIdsExhausted =>
                write!(f, "no local chat ids left"),
        }
    }
}

impl std::error::Error for AccountError {}

impl AccountError {
    /// Every variant is a caller or store bug; this is `false` only for
    /// conditions a well-behaved caller can still run into.
    pub fn is_programming_error(&self) -> bool {
        !matches!(self, Self::LocalIdsExhausted)
    }

    /// `true` for [`AccountError::RequestTypeMismatch`].
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::RequestTypeMismatch { .. })
    }
}

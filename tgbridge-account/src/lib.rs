//! # tgbridge-account
//!
//! Account state for a chat-client bridge: the in-process mirror of remote
//! users, chats and groups, plus the bookkeeping that ties asynchronous
//! remote calls back to the host action that started them.
//!
//! ## Features
//! - Entity store for users, chats, basic groups (with full info) and
//!   supergroups; updates in any order, any number of times
//! - Stable local chat ids, handed out in first-seen order
//! - Typed pending-request registry with mismatch detection
//! - Contact-addition tracking and contact/chat resolution
//! - Per-sender buffering of messages whose sender is not known yet
//! - Phone number canonicalisation and display names
//!
//! ```rust
//! use tgbridge_account::{AccountData, LocalChatId, requests::GroupInfoRequest};
//! use tgbridge_types::Chat;
//!
//! let mut data = AccountData::new();
//! assert_eq!(data.add_chat(Chat::private(1001, 77, "Ada")).unwrap(), LocalChatId(1));
//!
//! let id = data.next_request_id();
//! data.add_pending_request(id, GroupInfoRequest { group_id: 42 }).unwrap();
//! let ctx = data.take_pending_request::<GroupInfoRequest>(id).unwrap();
//! assert_eq!(ctx, Some(GroupInfoRequest { group_id: 42 }));
//! ```

#![deny(unsafe_code)]

mod config;
mod errors;
mod local_id;
mod shared;
mod store;
pub mod contacts;
pub mod delayed;
pub mod phone;
pub mod requests;

pub use config::AccountConfig;
pub use contacts::{ContactRequest, ContactRequests};
pub use delayed::DelayedMessages;
pub use errors::AccountError;
pub use local_id::LocalChatId;
pub use phone::{canonical_phone_number, display_name, is_canonical_phone_number, is_phone_number};
pub use requests::{
    DownloadRequest, FileFallback, GroupInfoRequest, PendingRequest, PendingRequests, RequestKind,
    RequestVariant,
};
pub use shared::SharedAccountData;
pub use store::AccountData;

/// How many messages to ask for per chat history request.
pub const CHAT_HISTORY_REQUEST_LIMIT: i32 = 50;
/// How many history messages to fetch in total when opening a chat.
pub const CHAT_HISTORY_RETRIEVE_LIMIT: i32 = 100;

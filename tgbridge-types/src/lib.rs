//! Remote chat entity objects.
//!
//! These are the plain value types the remote chat service pushes to the
//! client: users, chats, basic groups (plus their separately fetched full
//! info), supergroups, messages and files.  They carry no behaviour beyond
//! small accessors; all state tracking lives in `tgbridge-account`.
//!
//! # Overview
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`user`]    | [`User`], [`UserStatus`]                                  |
//! | [`chat`]    | [`Chat`], [`ChatType`]                                    |
//! | [`group`]   | [`BasicGroup`], [`BasicGroupFullInfo`], [`Supergroup`], membership |
//! | [`message`] | [`Message`], [`MessageContent`], [`File`]                 |
//!
//! Identifiers are kept in the remote service's own integer widths: users and
//! groups are `i32`, chats are `i64`.

#![deny(unsafe_code)]

pub mod chat;
pub mod group;
pub mod message;
pub mod user;

pub use chat::{Chat, ChatType};
pub use group::{BasicGroup, BasicGroupFullInfo, ChatMember, ChatMemberStatus, Supergroup};
pub use message::{File, Message, MessageContent};
pub use user::{User, UserStatus};

/// Remote user identifier.
pub type UserId = i32;
/// Remote chat identifier.
pub type ChatId = i64;
/// Remote basic group or supergroup identifier.
pub type GroupId = i32;
/// Remote file identifier.
pub type FileId = i32;

// ─── Core traits ──────────────────────────────────────────────────────────────

/// An entity that knows its own remote identifier.
///
/// Stores key their maps by this id, so an update for an entity always lands
/// on the same slot as every earlier update for it.
pub trait Identifiable {
    /// Remote id type (`i32` for users and groups, `i64` for chats).
    type Id: Copy + Ord + std::fmt::Debug;

    /// The remote id of this entity.
    fn id(&self) -> Self::Id;
}

//! Basic groups, their full info, and supergroups.

#[cfg(feature = "impl-serde")]
use serde::{Deserialize, Serialize};

use crate::{GroupId, Identifiable, UserId};

// ─── ChatMemberStatus ─────────────────────────────────────────────────────────

/// Our own (or another member's) standing in a group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub enum ChatMemberStatus {
    /// The group creator.  A creator can leave and still own the group.
    Creator { is_member: bool },
    Administrator,
    #[default]
    Member,
    /// Restricted user; may or may not still be in the group.
    Restricted { is_member: bool },
    Left,
    Banned,
}

impl ChatMemberStatus {
    /// Whether this status means "currently in the group".
    pub fn is_member(&self) -> bool {
        match self {
            Self::Creator { is_member } | Self::Restricted { is_member } => *is_member,
            Self::Administrator | Self::Member => true,
            Self::Left | Self::Banned => false,
        }
    }
}

/// One entry of a basic group's member list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub struct ChatMember {
    pub user_id:          UserId,
    pub inviter_user_id:  UserId,
    pub joined_chat_date: i32,
    pub status:           ChatMemberStatus,
}

// ─── BasicGroup ───────────────────────────────────────────────────────────────

/// Summary of a basic group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub struct BasicGroup {
    pub id:                        GroupId,
    pub member_count:              i32,
    /// Our own status in the group.
    pub status:                    ChatMemberStatus,
    /// `false` once the group was upgraded to a supergroup.
    pub is_active:                 bool,
    pub upgraded_to_supergroup_id: GroupId,
}

impl Identifiable for BasicGroup {
    type Id = GroupId;
    fn id(&self) -> GroupId { self.id }
}

/// Detailed basic group information, fetched separately from the summary.
///
/// Carries no id of its own: it is always stored under the id of the group it
/// was requested for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub struct BasicGroupFullInfo {
    pub description:     String,
    pub creator_user_id: UserId,
    pub members:         Vec<ChatMember>,
    pub invite_link:     String,
}

// ─── Supergroup ───────────────────────────────────────────────────────────────

/// Summary of a supergroup or channel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub struct Supergroup {
    pub id:           GroupId,
    pub username:     String,
    pub date:         i32,
    pub status:       ChatMemberStatus,
    pub member_count: i32,
    pub is_channel:   bool,
}

impl Identifiable for Supergroup {
    type Id = GroupId;
    fn id(&self) -> GroupId { self.id }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_by_status() {
        assert!(ChatMemberStatus::Member.is_member());
        assert!(ChatMemberStatus::Administrator.is_member());
        assert!(ChatMemberStatus::Creator { is_member: true }.is_member());
        assert!(!ChatMemberStatus::Creator { is_member: false }.is_member());
        assert!(ChatMemberStatus::Restricted { is_member: true }.is_member());
        assert!(!ChatMemberStatus::Restricted { is_member: false }.is_member());
        assert!(!ChatMemberStatus::Left.is_member());
        assert!(!ChatMemberStatus::Banned.is_member());
    }
}

//! The account store: authoritative mirror of remote entities for one session.
//!
//! Updates arrive from the remote service in any order and any number of
//! times.  Every entity is stored by value under its own remote id, and every
//! cross-reference (chat → user, chat → group) is an id looked up on demand,
//! so replacing an entity never leaves anything dangling.

use std::collections::BTreeMap;

use tgbridge_types::{
    BasicGroup, BasicGroupFullInfo, Chat, ChatId, ChatType, GroupId, Identifiable, Message,
    Supergroup, User, UserId,
};

use crate::config::AccountConfig;
use crate::contacts::{ContactRequest, ContactRequests};
use crate::delayed::DelayedMessages;
use crate::errors::AccountError;
use crate::local_id::{LocalChatId, LocalIdMap};
use crate::phone::canonical_phone_number;
use crate::requests::{PendingRequests, RequestIdSource, RequestKind, RequestVariant};

/// Basic group summary paired with its separately fetched full info.
/// Either half may arrive first.
#[derive(Debug, Default)]
struct GroupInfo {
    group:     Option<BasicGroup>,
    full_info: Option<BasicGroupFullInfo>,
}

/// Insert or replace `entity` under its own id.  Returns `true` if it was new.
fn upsert<E: Identifiable>(map: &mut BTreeMap<E::Id, E>, entity: E) -> bool {
    map.insert(entity.id(), entity).is_none()
}

// ─── AccountData ──────────────────────────────────────────────────────────────

/// Entity store, local id translator and request correlation for one account.
///
/// Not thread-safe on its own; see [`crate::SharedAccountData`].
#[derive(Debug)]
pub struct AccountData {
    tag:              String,
    users:            BTreeMap<UserId, User>,
    chats:            BTreeMap<ChatId, Chat>,
    local_ids:        LocalIdMap,
    groups:           BTreeMap<GroupId, GroupInfo>,
    supergroups:      BTreeMap<GroupId, Supergroup>,
    contacts:         Vec<UserId>,
    // May reference chats we have no `Chat` for (e.g. only known through a
    // forwarded message); those are skipped when listing.
    active_chats:     Vec<ChatId>,
    request_ids:      RequestIdSource,
    pending:          PendingRequests,
    contact_requests: ContactRequests,
    delayed:          DelayedMessages,
}

impl AccountData {
    /// A store with the default [`AccountConfig`].
    pub fn new() -> Self {
        Self::with_config(AccountConfig::default())
    }

    /// A store tagged and configured by `config`.
    pub fn with_config(config: AccountConfig) -> Self {
        let tag = format!("tgbridge:{}", config.account_name);
        Self {
            users:            BTreeMap::new(),
            chats:            BTreeMap::new(),
            local_ids:        LocalIdMap::new(config.first_local_id),
            groups:           BTreeMap::new(),
            supergroups:      BTreeMap::new(),
            contacts:         Vec::new(),
            active_chats:     Vec::new(),
            request_ids:      RequestIdSource::new(),
            pending:          PendingRequests::with_tag(tag.clone(), config.report_leaks),
            contact_requests: ContactRequests::with_tag(tag.clone(), config.report_leaks),
            delayed:          DelayedMessages::new(),
            tag,
        }
    }

    // ── Entity updates ───────────────────────────────────────────────────────

    /// Insert or replace a user.
    pub fn update_user(&mut self, user: User) {
        let id = user.id;
        if upsert(&mut self.users, user) {
            tracing::debug!("[{}] new user {id}", self.tag);
        }
    }

    /// Insert or replace a basic group summary; any full info is kept.
    pub fn update_basic_group(&mut self, group: BasicGroup) {
        let id = group.id;
        self.groups.entry(id).or_default().group = Some(group);
    }

    /// Store full info for `group_id`.  The summary may not be known yet.
    pub fn update_basic_group_info(&mut self, group_id: GroupId, info: BasicGroupFullInfo) {
        self.groups.entry(group_id).or_default().full_info = Some(info);
    }

    /// Insert or replace a supergroup.
    pub fn update_supergroup(&mut self, group: Supergroup) {
        upsert(&mut self.supergroups, group);
    }

    /// Insert or update `chat` and return its local id.
    ///
    /// The first time a remote chat id is seen it gets the next local id; every
    /// later call for the same id keeps that local id and only replaces the
    /// chat's fields.
    pub fn add_chat(&mut self, chat: Chat) -> Result<LocalChatId, AccountError> {
        let chat_id = chat.id;
        let (local_id, is_new) = self.local_ids.get_or_assign(chat_id).inspect_err(|e| {
            tracing::error!("[{}] cannot add chat {chat_id}: {e}", self.tag);
        })?;
        if is_new {
            tracing::debug!("[{}] chat {chat_id} → local id {local_id}", self.tag);
        }
        upsert(&mut self.chats, chat);
        Ok(local_id)
    }

    /// Apply a title change.  `false` if the chat is not known yet.
    pub fn update_chat_title(&mut self, chat_id: ChatId, title: impl Into<String>) -> bool {
        match self.chats.get_mut(&chat_id) {
            Some(chat) => { chat.title = title.into(); true }
            None => {
                tracing::debug!("[{}] title update for unknown chat {chat_id}", self.tag);
                false
            }
        }
    }

    /// Record `message` as the last message of its chat.  `false` if the chat
    /// is not known yet.
    pub fn update_chat_last_message(&mut self, message: Message) -> bool {
        match self.chats.get_mut(&message.chat_id) {
            Some(chat) => { chat.last_message = Some(message); true }
            None => {
                tracing::debug!("[{}] last message for unknown chat {}", self.tag, message.chat_id);
                false
            }
        }
    }

    /// Replace the tracked contact list.
    pub fn set_contacts(&mut self, user_ids: Vec<UserId>) {
        self.contacts = user_ids;
    }

    /// Replace the tracked active chat list.
    pub fn set_active_chats(&mut self, chat_ids: Vec<ChatId>) {
        self.active_chats = chat_ids;
    }

    // ── Lookups ──────────────────────────────────────────────────────────────

    /// The chat with remote id `chat_id`.
    pub fn get_chat(&self, chat_id: ChatId) -> Option<&Chat> {
        self.chats.get(&chat_id)
    }

    /// The local id assigned to `chat_id` by [`AccountData::add_chat`].
    pub fn get_local_id(&self, chat_id: ChatId) -> Option<LocalChatId> {
        self.local_ids.local(chat_id)
    }

    /// The chat paired with `local_id`.
    pub fn get_chat_by_local_id(&self, local_id: LocalChatId) -> Option<&Chat> {
        self.local_ids.remote(local_id).and_then(|id| self.chats.get(&id))
    }

    /// The user with remote id `user_id`.
    pub fn get_user(&self, user_id: UserId) -> Option<&User> {
        self.users.get(&user_id)
    }

    /// Find a user by phone number in any accepted formatting.
    pub fn get_user_by_phone(&self, phone_number: &str) -> Option<&User> {
        let wanted = canonical_phone_number(phone_number)?;
        self.users.values().find(|u| {
            canonical_phone_number(&u.phone_number).as_deref() == Some(wanted.as_str())
        })
    }

    /// The basic group summary, once it has arrived.
    pub fn get_basic_group(&self, group_id: GroupId) -> Option<&BasicGroup> {
        self.groups.get(&group_id).and_then(|g| g.group.as_ref())
    }

    /// The basic group full info, once it has arrived.
    pub fn get_basic_group_info(&self, group_id: GroupId) -> Option<&BasicGroupFullInfo> {
        self.groups.get(&group_id).and_then(|g| g.full_info.as_ref())
    }

    /// The supergroup with remote id `group_id`.
    pub fn get_supergroup(&self, group_id: GroupId) -> Option<&Supergroup> {
        self.supergroups.get(&group_id)
    }

    /// The chat of basic group `group_id`.
    pub fn get_basic_group_chat_by_group(&self, group_id: GroupId) -> Option<&Chat> {
        self.chats.values().find(|c| c.basic_group_id() == Some(group_id))
    }

    /// The chat of supergroup `group_id`.
    pub fn get_supergroup_chat_by_group(&self, group_id: GroupId) -> Option<&Chat> {
        self.chats.values().find(|c| c.supergroup_id() == Some(group_id))
    }

    /// `true` if `chat` is a group chat and we are currently a member of it.
    pub fn is_group_chat_with_membership(&self, chat: &Chat) -> bool {
        match chat.chat_type {
            ChatType::BasicGroup { basic_group_id } => self
                .get_basic_group(basic_group_id)
                .is_some_and(|g| g.status.is_member()),
            ChatType::Supergroup { supergroup_id, .. } => self
                .get_supergroup(supergroup_id)
                .is_some_and(|g| g.status.is_member()),
            _ => false,
        }
    }

    /// Chats of the active chat list, in list order.  Ids without a known
    /// chat are skipped.
    pub fn get_active_chats(&self) -> Vec<&Chat> {
        self.active_chats.iter().filter_map(|id| self.chats.get(id)).collect()
    }

    // ── Contact resolution ───────────────────────────────────────────────────

    /// The private chat with `user_id`, if one is known.
    pub fn get_private_chat_by_user_id(&self, user_id: UserId) -> Option<&Chat> {
        self.chats.values().find(|c| c.private_user_id() == Some(user_id))
    }

    /// The counterparty of a private chat.  `None` for other chat types or if
    /// the user is not known yet.
    pub fn get_user_by_private_chat(&self, chat: &Chat) -> Option<&User> {
        chat.private_user_id().and_then(|id| self.get_user(id))
    }

    /// Tracked contacts with no private chat, in contact list order.
    pub fn get_contacts_with_no_chat(&self) -> Vec<UserId> {
        self.contacts
            .iter()
            .copied()
            .filter(|&id| self.get_private_chat_by_user_id(id).is_none())
            .collect()
    }

    // ── Request correlation ──────────────────────────────────────────────────

    /// Next unused request id for this account.
    pub fn next_request_id(&mut self) -> u64 {
        self.request_ids.next_id()
    }

    /// See [`PendingRequests::register`].
    pub fn add_pending_request<R: RequestVariant>(&mut self, request_id: u64, payload: R) -> Result<(), AccountError> {
        self.pending.register(request_id, payload)
    }

    /// See [`PendingRequests::take`].
    pub fn take_pending_request<R: RequestVariant>(&mut self, request_id: u64) -> Result<Option<R>, AccountError> {
        self.pending.take(request_id)
    }

    /// See [`PendingRequests::evict`].
    pub fn evict_pending_request(&mut self, request_id: u64) -> Option<RequestKind> {
        self.pending.evict(request_id)
    }

    /// Read access to the pending request registry.
    pub fn pending_requests(&self) -> &PendingRequests {
        &self.pending
    }

    /// Remember a contact addition in flight.  See [`ContactRequests::add`].
    pub fn add_contact_request(
        &mut self,
        request_id: u64,
        phone_number: &str,
        alias: &str,
        user_id: Option<UserId>,
    ) {
        self.contact_requests.add(request_id, phone_number, alias, user_id);
    }

    /// Remove and return a contact addition.  See [`ContactRequests::extract`].
    pub fn extract_contact_request(&mut self, request_id: u64) -> Option<ContactRequest> {
        self.contact_requests.extract(request_id)
    }

    // ── Delayed messages ─────────────────────────────────────────────────────

    /// Park `message` until `user_id` can be resolved.
    pub fn add_delayed_message(&mut self, user_id: UserId, message: Message) {
        tracing::debug!("[{}] delaying message {} from unresolved user {user_id}", self.tag, message.id);
        self.delayed.delay(user_id, message);
    }

    /// All messages parked for `user_id`, oldest first.
    pub fn extract_delayed_messages_by_user(&mut self, user_id: UserId) -> Vec<Message> {
        self.delayed.drain(user_id)
    }

    /// Release queued messages of every sender that is now a known user.
    ///
    /// Senders ascending by id; each sender's messages in arrival order.
    pub fn drain_resolved_delayed_messages(&mut self) -> Vec<(UserId, Vec<Message>)> {
        let resolved: Vec<UserId> = self
            .delayed
            .senders()
            .filter(|id| self.users.contains_key(id))
            .collect();
        resolved
            .into_iter()
            .map(|id| (id, self.delayed.drain(id)))
            .collect()
    }

    /// Read access to the delayed message buffer.
    pub fn delayed_messages(&self) -> &DelayedMessages {
        &self.delayed
    }
}

impl Default for AccountData {
    fn default() -> Self { Self::new() }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::GroupInfoRequest;
    use tgbridge_types::ChatMemberStatus;

    fn group_chat(id: ChatId, group_id: GroupId) -> Chat {
        Chat::new(id, ChatType::BasicGroup { basic_group_id: group_id }, "group")
    }

    #[test]
    fn readding_chat_keeps_local_id_and_updates_fields() {
        let mut data = AccountData::new();
        assert_eq!(data.add_chat(Chat::private(1001, 77, "old")).unwrap(), LocalChatId(1));
        assert_eq!(data.add_chat(Chat::private(1001, 77, "new")).unwrap(), LocalChatId(1));
        assert_eq!(data.get_chat(1001).unwrap().title, "new");
        assert_eq!(data.get_chat_by_local_id(LocalChatId(1)).unwrap().title, "new");
        assert_eq!(data.get_chat_by_local_id(LocalChatId(2)), None);
    }

    #[test]
    fn configured_first_local_id() {
        let mut data = AccountData::with_config(AccountConfig { first_local_id: 100, ..Default::default() });
        assert_eq!(data.add_chat(Chat::private(1, 2, "x")).unwrap(), LocalChatId(100));
        assert_eq!(data.add_chat(Chat::private(3, 4, "y")).unwrap(), LocalChatId(101));
    }

    #[test]
    fn full_info_before_summary() {
        let mut data = AccountData::new();
        data.update_basic_group_info(42, BasicGroupFullInfo { description: "d".into(), ..Default::default() });
        assert!(data.get_basic_group(42).is_none());
        assert_eq!(data.get_basic_group_info(42).unwrap().description, "d");

        data.update_basic_group(BasicGroup { id: 42, member_count: 3, ..Default::default() });
        assert_eq!(data.get_basic_group(42).unwrap().member_count, 3);
        assert_eq!(data.get_basic_group_info(42).unwrap().description, "d");
        assert!(data.get_basic_group_info(43).is_none());
    }

    #[test]
    fn group_membership() {
        let mut data = AccountData::new();
        data.update_basic_group(BasicGroup { id: 1, status: ChatMemberStatus::Member, ..Default::default() });
        data.update_supergroup(Supergroup { id: 2, status: ChatMemberStatus::Left, ..Default::default() });
        let basic = group_chat(-1, 1);
        let sg = Chat::new(-2, ChatType::Supergroup { supergroup_id: 2, is_channel: false }, "sg");
        let unknown = group_chat(-3, 3);
        assert!(data.is_group_chat_with_membership(&basic));
        assert!(!data.is_group_chat_with_membership(&sg));
        assert!(!data.is_group_chat_with_membership(&unknown));
        assert!(!data.is_group_chat_with_membership(&Chat::private(5, 5, "p")));
    }

    #[test]
    fn chat_by_group() {
        let mut data = AccountData::new();
        data.add_chat(group_chat(-10, 42)).unwrap();
        data.add_chat(Chat::new(-20, ChatType::Supergroup { supergroup_id: 42, is_channel: true }, "c")).unwrap();
        assert_eq!(data.get_basic_group_chat_by_group(42).map(|c| c.id), Some(-10));
        assert_eq!(data.get_supergroup_chat_by_group(42).map(|c| c.id), Some(-20));
        assert!(data.get_basic_group_chat_by_group(7).is_none());
    }

    #[test]
    fn partial_updates_need_known_chat() {
        let mut data = AccountData::new();
        assert!(!data.update_chat_title(5, "t"));
        assert!(!data.update_chat_last_message(Message::text(1, 5, 9, "hi")));
        assert!(data.get_chat(5).is_none());

        data.add_chat(Chat::private(5, 9, "old")).unwrap();
        assert!(data.update_chat_title(5, "t"));
        assert!(data.update_chat_last_message(Message::text(1, 5, 9, "hi")));
        let chat = data.get_chat(5).unwrap();
        assert_eq!(chat.title, "t");
        assert_eq!(chat.last_message.as_ref().map(|m| m.id), Some(1));
    }

    #[test]
    fn active_chats_skip_unknown() {
        let mut data = AccountData::new();
        data.add_chat(Chat::private(1, 10, "a")).unwrap();
        data.add_chat(Chat::private(2, 20, "b")).unwrap();
        data.set_active_chats(vec![2, 999, 1]);
        let ids: Vec<ChatId> = data.get_active_chats().iter().map(|c| c.id).collect();
        assert_eq!(ids, [2, 1]);
        data.set_active_chats(vec![1]);
        assert_eq!(data.get_active_chats().len(), 1);
    }

    #[test]
    fn resolved_delayed_messages_released() {
        let mut data = AccountData::new();
        data.add_delayed_message(8, Message::text(1, 80, 8, "a"));
        data.add_delayed_message(9, Message::text(2, 90, 9, "b"));
        data.add_delayed_message(8, Message::text(3, 80, 8, "c"));
        assert!(data.drain_resolved_delayed_messages().is_empty());

        data.update_user(User::new(8, "Eight", ""));
        let released = data.drain_resolved_delayed_messages();
        assert_eq!(released.len(), 1);
        assert_eq!(released[0].0, 8);
        let ids: Vec<i64> = released[0].1.iter().map(|m| m.id).collect();
        assert_eq!(ids, [1, 3]);
        assert!(data.delayed_messages().has_messages_from(9));
    }

    #[test]
    fn request_ids_and_registry() {
        let mut data = AccountData::new();
        let id = data.next_request_id();
        assert_ne!(id, data.next_request_id());
        data.add_pending_request(id, GroupInfoRequest { group_id: 1 }).unwrap();
        assert_eq!(data.pending_requests().len(), 1);
        assert_eq!(data.evict_pending_request(id), Some(RequestKind::GroupInfo));
        assert!(data.pending_requests().is_empty());
    }
}

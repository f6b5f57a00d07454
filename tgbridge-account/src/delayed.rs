//! Messages parked until their sender can be resolved.
//!
//! A brand-new correspondent's first message has been seen to arrive before
//! their user object.  Such messages wait here, per sender, and are released
//! in arrival order once the sender is known.

use std::collections::{BTreeMap, VecDeque};

use tgbridge_types::{Message, UserId};

/// Sender → FIFO of messages.  Unbounded; callers limit arrival upstream.
#[derive(Debug, Default)]
pub struct DelayedMessages {
    queues: BTreeMap<UserId, VecDeque<Message>>,
}

impl DelayedMessages {
    pub fn new() -> Self { Self::default() }

    /// Queue `message` behind any earlier ones from `user_id`.
    pub fn delay(&mut self, user_id: UserId, message: Message) {
        self.queues.entry(user_id).or_default().push_back(message);
    }

    /// All messages queued for `user_id`, oldest first.  Empty if none.
    pub fn drain(&mut self, user_id: UserId) -> Vec<Message> {
        self.queues.remove(&user_id).map(Vec::from).unwrap_or_default()
    }

    /// Senders that currently have queued messages, ascending.
    pub fn senders(&self) -> impl Iterator<Item = UserId> + '_ {
        self.queues.keys().copied()
    }

    pub fn has_messages_from(&self, user_id: UserId) -> bool {
        self.queues.contains_key(&user_id)
    }

    /// Total number of queued messages.
    pub fn len(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool { self.queues.is_empty() }
}

//! "Add contact by phone number" correlation.
//!
//! Adding a contact takes two round trips (import the number, then resolve the
//! user it maps to), so the phone number and alias the user typed have to be
//! remembered in between.  [`ContactRequests`] is a small fixed-shape table
//! for that; the same [`ContactRequest`] can also travel through the generic
//! [`crate::requests::PendingRequests`] registry.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tgbridge_types::UserId;

/// What the user asked for when adding a contact.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactRequest {
    pub phone_number: String,
    pub alias:        String,
    /// Set when the user behind the number was already known at request time.
    pub user_id:      Option<UserId>,
}

/// Request id → [`ContactRequest`].
pub struct ContactRequests {
    entries:      HashMap<u64, ContactRequest>,
    tag:          String,
    report_leaks: bool,
}

impl ContactRequests {
    pub fn new() -> Self {
        Self::with_tag("tgbridge", true)
    }

    pub(crate) fn with_tag(tag: impl Into<String>, report_leaks: bool) -> Self {
        Self { entries: HashMap::new(), tag: tag.into(), report_leaks }
    }

    /// Remember a contact addition in flight under `request_id`.
    ///
    /// A second call with an outstanding id replaces the earlier entry.
    pub fn add(
        &mut self,
        request_id: u64,
        phone_number: impl Into<String>,
        alias: impl Into<String>,
        user_id: Option<UserId>,
    ) {
        let req = ContactRequest {
            phone_number: phone_number.into(),
            alias:        alias.into(),
            user_id,
        };
        tracing::debug!("[{}] contact request {request_id} for {}", self.tag, req.phone_number);
        if self.entries.insert(request_id, req).is_some() {
            tracing::warn!("[{}] contact request {request_id} replaced an outstanding one", self.tag);
        }
    }

    /// Remove and return the entry for `request_id`.
    pub fn extract(&mut self, request_id: u64) -> Option<ContactRequest> {
        self.entries.remove(&request_id)
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl Default for ContactRequests {
    fn default() -> Self { Self::new() }
}

impl std::fmt::Debug for ContactRequests {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactRequests")
            .field("tag", &self.tag)
            .field("len", &self.entries.len())
            .finish()
    }
}

impl Drop for ContactRequests {
    fn drop(&mut self) {
        if self.report_leaks && !self.entries.is_empty() {
            tracing::warn!("[{}] {} contact request(s) never answered", self.tag, self.entries.len());
        }
    }
}

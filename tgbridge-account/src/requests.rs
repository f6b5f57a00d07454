//! Pending request registry.
//!
//! Responses from the remote service carry only the request id they were
//! issued with.  Before firing an asynchronous call the caller registers its
//! context here; when the response arrives it takes the context back, typed,
//! exactly once.
//!
//! The set of request kinds is closed ([`PendingRequest`]).  Each payload type
//! implements [`RequestVariant`], which is how [`PendingRequests::take`] knows
//! what the caller expects without any downcasting.
//!
//! ```rust
//! use tgbridge_account::requests::{GroupInfoRequest, PendingRequests, DownloadRequest};
//!
//! let mut pending = PendingRequests::new();
//! pending.register(5, GroupInfoRequest { group_id: 42 }).unwrap();
//!
//! // Wrong handler wired to the response: a mismatch, not an absence.
//! assert!(pending.take::<DownloadRequest>(5).unwrap_err().is_type_mismatch());
//! ```

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tgbridge_types::{ChatId, File, GroupId};

use crate::contacts::ContactRequest;
use crate::errors::AccountError;

// ─── RequestKind ──────────────────────────────────────────────────────────────

/// Discriminant of a [`PendingRequest`], used in errors and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
    GroupInfo,
    Download,
    NewContact,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GroupInfo  => "group-info",
            Self::Download   => "download",
            Self::NewContact => "new-contact",
        })
    }
}

// ─── Payloads ─────────────────────────────────────────────────────────────────

/// Context for a basic group full-info lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupInfoRequest {
    pub group_id: GroupId,
}

/// What to show instead of a downloaded file the host cannot display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FileFallback {
    #[default]
    None,
    /// Animated sticker: show the fallback thumbnail instead.
    ReplaceTgs,
}

/// Matches a completed download to the chat message it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DownloadRequest {
    pub chat_id:       ChatId,
    /// Display name of the sender, resolved when the download was started.
    pub sender:        String,
    /// Unix timestamp of the original message.
    pub timestamp:     i32,
    pub outgoing:      bool,
    /// Label shown next to the file (e.g. "Sticker").
    pub label:         String,
    pub fallback_type: FileFallback,
    pub fallback:      Option<File>,
}

impl DownloadRequest {
    /// `timestamp` as a UTC date; `None` if it is out of range.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::from(self.timestamp), 0)
    }
}

// ─── PendingRequest ───────────────────────────────────────────────────────────

/// One in-flight request context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingRequest {
    GroupInfo(GroupInfoRequest),
    Download(DownloadRequest),
    NewContact(ContactRequest),
}

impl PendingRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::GroupInfo(_)  => RequestKind::GroupInfo,
            Self::Download(_)   => RequestKind::Download,
            Self::NewContact(_) => RequestKind::NewContact,
        }
    }
}

/// A payload type that can be stored in [`PendingRequests`].
pub trait RequestVariant: Sized {
    /// The kind this payload is stored as.
    const KIND: RequestKind;

    /// Wrap into the closed request enum.
    fn into_pending(self) -> PendingRequest;

    /// Unwrap from the closed request enum; hands the request back untouched
    /// if it holds a different kind.
    fn from_pending(req: PendingRequest) -> Result<Self, PendingRequest>;
}

macro_rules! request_variant {
    ($ty:ty, $variant:ident) => {
        impl RequestVariant for $ty {
            const KIND: RequestKind = RequestKind::$variant;

            fn into_pending(self) -> PendingRequest {
                PendingRequest::$variant(self)
            }

            fn from_pending(req: PendingRequest) -> Result<Self, PendingRequest> {
                match req {
                    PendingRequest::$variant(r) => Ok(r),
                    other => Err(other),
                }
            }
        }

        impl From<$ty> for PendingRequest {
            fn from(r: $ty) -> Self { r.into_pending() }
        }
    };
}

request_variant!(GroupInfoRequest, GroupInfo);
request_variant!(DownloadRequest, Download);
request_variant!(ContactRequest, NewContact);

// ─── RequestIdSource ──────────────────────────────────────────────────────────

/// Monotonically increasing request ids, starting at 1.
#[derive(Debug)]
pub struct RequestIdSource {
    next: u64,
}

impl RequestIdSource {
    pub fn new() -> Self { Self { next: 1 } }

    /// Hand out the next id.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for RequestIdSource {
    fn default() -> Self { Self::new() }
}

// ─── PendingRequests ──────────────────────────────────────────────────────────

/// Request id → in-flight context.
///
/// Un-taken entries are leaks; on drop they are reported with `warn!` unless
/// reporting was switched off.
pub struct PendingRequests {
    entries:      HashMap<u64, PendingRequest>,
    tag:          String,
    report_leaks: bool,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::with_tag("tgbridge", true)
    }

    pub(crate) fn with_tag(tag: impl Into<String>, report_leaks: bool) -> Self {
        Self { entries: HashMap::new(), tag: tag.into(), report_leaks }
    }

    /// Store `payload` under `request_id`.
    ///
    /// The id must not be outstanding already; if it is, the existing entry is
    /// kept and [`AccountError::DuplicateRequestId`] is returned.
    pub fn register<R: RequestVariant>(&mut self, request_id: u64, payload: R) -> Result<(), AccountError> {
        if self.entries.contains_key(&request_id) {
            tracing::warn!("[{}] request {request_id} registered twice; keeping the first", self.tag);
            return Err(AccountError::DuplicateRequestId { request_id });
        }
        tracing::debug!("[{}] pending {} request {request_id}", self.tag, R::KIND);
        self.entries.insert(request_id, payload.into_pending());
        Ok(())
    }

    /// Remove and return the context for `request_id`.
    ///
    /// - `Ok(Some(_))`: the entry existed and was of kind `R`.
    /// - `Ok(None)`: no such entry (late or duplicate response).
    /// - `Err(RequestTypeMismatch)`: the entry holds another kind.  It is
    ///   consumed anyway: the response it belonged to has been routed wrongly.
    pub fn take<R: RequestVariant>(&mut self, request_id: u64) -> Result<Option<R>, AccountError> {
        let Some(req) = self.entries.remove(&request_id) else {
            tracing::debug!("[{}] no pending request {request_id}", self.tag);
            return Ok(None);
        };
        match R::from_pending(req) {
            Ok(r) => Ok(Some(r)),
            Err(other) => {
                let found = other.kind();
                tracing::error!(
                    "[{}] request {request_id}: handler expected {} context, found {found}",
                    self.tag, R::KIND,
                );
                Err(AccountError::RequestTypeMismatch { request_id, expected: R::KIND, found })
            }
        }
    }

    /// Drop the entry for `request_id` without looking at it, e.g. when the
    /// caller's own timeout fired.  Returns the kind that was evicted.
    pub fn evict(&mut self, request_id: u64) -> Option<RequestKind> {
        let kind = self.entries.remove(&request_id).map(|r| r.kind());
        if let Some(kind) = kind {
            tracing::debug!("[{}] evicted {kind} request {request_id}", self.tag);
        }
        kind
    }

    pub fn contains(&self, request_id: u64) -> bool {
        self.entries.contains_key(&request_id)
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl Default for PendingRequests {
    fn default() -> Self { Self::new() }
}

impl fmt::Debug for PendingRequests {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingRequests")
            .field("tag", &self.tag)
            .field("len", &self.entries.len())
            .finish()
    }
}

impl Drop for PendingRequests {
    fn drop(&mut self) {
        if self.report_leaks && !self.entries.is_empty() {
            let mut ids: Vec<u64> = self.entries.keys().copied().collect();
            ids.sort_unstable();
            tracing::warn!("[{}] {} request(s) never answered: {ids:?}", self.tag, ids.len());
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn download(chat_id: ChatId) -> DownloadRequest {
        DownloadRequest {
            chat_id,
            sender:        "Ada".into(),
            timestamp:     1_600_000_000,
            outgoing:      false,
            label:         "Sticker".into(),
            fallback_type: FileFallback::ReplaceTgs,
            fallback:      Some(File { id: 3, ..Default::default() }),
        }
    }

    #[test]
    fn take_is_exactly_once() {
        let mut p = PendingRequests::new();
        p.register(1, download(10)).unwrap();
        assert_eq!(p.take::<DownloadRequest>(1).unwrap(), Some(download(10)));
        assert_eq!(p.take::<DownloadRequest>(1).unwrap(), None);
        assert!(p.is_empty());
    }

    #[test]
    fn mismatch_is_not_absence() {
        let mut p = PendingRequests::new();
        p.register(2, download(10)).unwrap();
        let err = p.take::<GroupInfoRequest>(2).unwrap_err();
        assert_eq!(err, AccountError::RequestTypeMismatch {
            request_id: 2,
            expected:   RequestKind::GroupInfo,
            found:      RequestKind::Download,
        });
        assert!(!p.contains(2));
    }

    #[test]
    fn duplicate_register_keeps_first() {
        let mut p = PendingRequests::new();
        p.register(3, GroupInfoRequest { group_id: 1 }).unwrap();
        let err = p.register(3, GroupInfoRequest { group_id: 2 }).unwrap_err();
        assert_eq!(err, AccountError::DuplicateRequestId { request_id: 3 });
        assert_eq!(p.take::<GroupInfoRequest>(3).unwrap(), Some(GroupInfoRequest { group_id: 1 }));
    }

    #[test]
    fn evict_reports_kind() {
        let mut p = PendingRequests::new();
        p.register(4, GroupInfoRequest { group_id: 1 }).unwrap();
        assert_eq!(p.evict(4), Some(RequestKind::GroupInfo));
        assert_eq!(p.evict(4), None);
        assert_eq!(p.len(), 0);
    }

    #[test]
    fn request_ids_increase() {
        let mut ids = RequestIdSource::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.next_id(), 3);
    }

    #[test]
    fn download_timestamp_as_date() {
        let d = download(1);
        assert_eq!(d.sent_at().map(|t| t.timestamp()), Some(1_600_000_000));
        assert_eq!(PendingRequest::from(d).kind(), RequestKind::Download);
    }
}

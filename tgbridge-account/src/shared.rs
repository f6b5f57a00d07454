//! Cross-thread access to an [`AccountData`].
//!
//! Updates come in on the transport's thread while the host's event loop
//! issues queries.  Both go through one coarse lock per operation; every
//! operation is short and never blocks, and no reference into the store
//! outlives the closure it was handed to.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::AccountConfig;
use crate::store::AccountData;

/// Cheaply clonable handle to one account's store.
#[derive(Clone, Debug, Default)]
pub struct SharedAccountData {
    inner: Arc<Mutex<AccountData>>,
}

impl SharedAccountData {
    pub fn new(data: AccountData) -> Self {
        Self { inner: Arc::new(Mutex::new(data)) }
    }

    pub fn with_config(config: AccountConfig) -> Self {
        Self::new(AccountData::with_config(config))
    }

    /// Run `f` with exclusive access to the store.
    ///
    /// A panic inside an earlier closure does not make the store unusable: the
    /// store has no multi-step invariants that a panic could leave half done.
    pub fn with<R>(&self, f: impl FnOnce(&mut AccountData) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, AccountData> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

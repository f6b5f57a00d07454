//! Store configuration.

/// Configuration for [`crate::AccountData::with_config`].
#[derive(Clone, Debug)]
pub struct AccountConfig {
    /// Tag used in log lines, so several sessions in one process can be told apart.
    pub account_name:   String,
    /// Warn about un-extracted requests when the store is dropped (default: true).
    pub report_leaks:   bool,
    /// First local chat id handed out (default: 1).  Values below 1 are
    /// treated as 1.
    pub first_local_id: i32,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            account_name:   "default".to_string(),
            report_leaks:   true,
            first_local_id: 1,
        }
    }
}

impl AccountConfig {
    /// Default config with the given account name.
    pub fn named(name: impl Into<String>) -> Self {
        Self { account_name: name.into(), ..Default::default() }
    }
}

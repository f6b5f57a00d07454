//! Users.

#[cfg(feature = "impl-serde")]
use serde::{Deserialize, Serialize};

use crate::{Identifiable, UserId};

/// Last-seen status of a user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub enum UserStatus {
    #[default]
    Empty,
    Online { expires: i32 },
    Offline { was_online: i32 },
    Recently,
    LastWeek,
    LastMonth,
}

/// A remote user profile.
///
/// `phone_number` is stored as the service sends it: digits only, without the
/// leading `+`.  It is empty when the number is hidden from us.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "impl-serde", derive(Serialize, Deserialize))]
pub struct User {
    pub id:           UserId,
    pub first_name:   String,
    pub last_name:    String,
    pub username:     String,
    pub phone_number: String,
    pub status:       UserStatus,
    pub is_contact:   bool,
}

impl User {
    /// Convenience constructor for a user with just a name and phone number.
    pub fn new(id: UserId, first_name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            id,
            first_name:   first_name.into(),
            phone_number: phone_number.into(),
            ..Default::default()
        }
    }

    /// `"First Last"`, or whichever half is set.  Empty if neither is.
    pub fn full_name(&self) -> String {
        let first = self.first_name.trim();
        let last  = self.last_name.trim();
        format!("{first} {last}").trim().to_string()
    }
}

impl Identifiable for User {
    type Id = UserId;
    fn id(&self) -> UserId { self.id }
}

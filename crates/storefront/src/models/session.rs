//! Session-related types.
//!
//! Types stored on the device for staff authentication state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nordora_core::{Role, UserId};

/// Identity of the signed-in staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Account id.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Permission level.
    pub role: Role,
}

/// Stored session: who is signed in and until when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Signed-in user.
    #[serde(flatten)]
    pub user: CurrentUser,
    /// Moment after which the session is no longer honoured.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has lapsed at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// The fixed set of household users
///
/// The application serves exactly one household; users are not open-ended
/// accounts but a small closed enum stored as lowercase text. There is no
/// users table; sessions and transactions carry the name directly.

use serde::{Deserialize, Serialize};

/// A household member
///
/// Stored in `user_name` text columns as the lowercase variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserName {
    /// Primary user; sessions created at sign-in default to this member
    Alex,

    /// Second household member
    Sam,
}

impl UserName {
    /// The user assigned to freshly created sessions
    pub fn default_user() -> Self {
        UserName::Alex
    }

    /// Converts the user to its storage/protocol string
    pub fn as_str(&self) -> &'static str {
        match self {
            UserName::Alex => "alex",
            UserName::Sam => "sam",
        }
    }
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

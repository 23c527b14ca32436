//! Participant permission levels

use serde::{Deserialize, Serialize};

/// Permission level granted to a token holder.
///
/// Serialized as lowercase text both in signed payloads and in JWT claims.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can subscribe to streams published by other participants
    Subscriber,

    /// Can publish own streams in addition to subscribing
    #[default]
    Publisher,

    /// Full permissions, including forcing other participants to disconnect
    Moderator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Subscriber => "subscriber",
            Role::Publisher => "publisher",
            Role::Moderator => "moderator",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

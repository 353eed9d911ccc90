use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identity issued by the external authentication provider.
///
/// Users are not stored here; the id is an opaque string that orders, reviews and carts
/// refer to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Owner recorded on orders placed without a signed-in user.
    pub const GUEST: &'static str = "guest";

    pub fn guest() -> Self {
        Self(Self::GUEST.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the id is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//! Session visibility.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Who may view a chat session besides its owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Only the owner can open the session.
    #[default]
    Private,
    /// Anyone holding the link can open the session read-only.
    Public,
}

impl Visibility {
    /// Every value, in selector order.
    pub const ALL: [Self; 2] = [Self::Private, Self::Public];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Private => "Private",
            Self::Public => "Public",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Private => "Only you can access this chat",
            Self::Public => "Anyone with the link can access this chat",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is neither `private` nor `public`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown visibility: {0:?}")]
pub struct ParseVisibilityError(String);

impl FromStr for Visibility {
    type Err = ParseVisibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "private" => Ok(Self::Private),
            "public" => Ok(Self::Public),
            _ => Err(ParseVisibilityError(s.to_string())),
        }
    }
}

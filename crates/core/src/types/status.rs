//! Status enums for collaborator outcomes.

use serde::{Deserialize, Serialize};

/// Outcome of the most recent save through the persistence collaborator.
///
/// A failed save never rolls back the cart; it only marks the state as not
/// yet durable so the caller can surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SaveStatus {
    /// Nothing has changed since the cart was loaded.
    #[default]
    Clean,
    /// The last mutation was saved.
    Saved,
    /// The last save failed; the in-memory cart is ahead of storage.
    Unsaved,
}

impl SaveStatus {
    /// Returns `true` if the in-memory cart may be lost on restart.
    #[must_use]
    pub const fn is_degraded(self) -> bool {
        matches!(self, Self::Unsaved)
    }
}

impl std::fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clean => write!(f, "clean"),
            Self::Saved => write!(f, "saved"),
            Self::Unsaved => write!(f, "unsaved"),
        }
    }
}

//! Access level labels and their numeric ranks.
//!
//! The search index stores access levels as integers so that queries can
//! filter with `access_level <= N`. The order of the variants is the
//! privilege hierarchy: `Public` is the least privileged, `Admin` the most.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of access levels a document may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccessLevel {
    /// Publicly accessible content.
    Public = 0,
    /// Internal developer documentation.
    Developer = 1,
    /// Architecture-level documentation.
    Architect = 2,
    /// Full administrative access.
    Admin = 3,
}

impl AccessLevel {
    /// The level assumed when a record's label is missing or unknown.
    pub const DEFAULT: AccessLevel = AccessLevel::Developer;

    /// Numeric rank stored in the search index.
    pub fn rank(self) -> i32 {
        self as i32
    }

    /// Resolve a label from the document store.
    ///
    /// Canonical labels (`"Public"`, `"Developer"`, `"Architect"`, `"Admin"`)
    /// match exactly; other casings and surrounding whitespace are tolerated.
    /// Returns `None` for anything outside the closed set.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Public" => return Some(AccessLevel::Public),
            "Developer" => return Some(AccessLevel::Developer),
            "Architect" => return Some(AccessLevel::Architect),
            "Admin" => return Some(AccessLevel::Admin),
            _ => {}
        }

        match label.trim().to_lowercase().as_str() {
            "public" => Some(AccessLevel::Public),
            "developer" => Some(AccessLevel::Developer),
            "architect" => Some(AccessLevel::Architect),
            "admin" => Some(AccessLevel::Admin),
            _ => None,
        }
    }

    /// Rank for an optional label, falling back to [`AccessLevel::DEFAULT`].
    pub fn rank_for_label(label: Option<&str>) -> i32 {
        label
            .and_then(Self::from_label)
            .unwrap_or(Self::DEFAULT)
            .rank()
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessLevel::Public => write!(f, "Public"),
            AccessLevel::Developer => write!(f, "Developer"),
            AccessLevel::Architect => write!(f, "Architect"),
            AccessLevel::Admin => write!(f, "Admin"),
        }
    }
}

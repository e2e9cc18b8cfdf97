//! Employee model.
//!
//! Employees are owned by the external directory. Each one works a single
//! primary role and carries a rating per role; the rating for the
//! requester's role is what ranks replacement candidates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Rating assumed for a role that is absent from an employee's ratings.
///
/// Lower than any rating that can be stored, so an unrated candidate is
/// always the least preferred replacement and the first to be displaced.
pub const MISSING_RATING: i32 = i32::MIN;

/// Stable unique employee identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u32);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named job function (e.g. "Server", "Line_Cook").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Per-role skill ratings.
///
/// Lookups are total: an absent role reads as [`MISSING_RATING`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillRatings(BTreeMap<Role, i32>);

impl SkillRatings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rating for a role, replacing any previous value.
    pub fn set(&mut self, role: Role, rating: i32) {
        self.0.insert(role, rating);
    }

    /// Rating for `role`, or [`MISSING_RATING`] if unrated.
    pub fn rating(&self, role: &Role) -> i32 {
        self.0.get(role).copied().unwrap_or(MISSING_RATING)
    }

    /// Whether a rating is recorded for `role`.
    pub fn has(&self, role: &Role) -> bool {
        self.0.contains_key(role)
    }

    /// Rated roles in name order.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Role, i32)> for SkillRatings {
    fn from_iter<I: IntoIterator<Item = (Role, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier.
    pub id: EmployeeId,
    /// Unique display name; requests address employees by name.
    pub name: String,
    /// Primary role worked.
    pub role: Role,
    /// Skill ratings per role.
    #[serde(default)]
    pub ratings: SkillRatings,
}

impl Employee {
    /// Creates an employee with no ratings.
    pub fn new(id: u32, name: impl Into<String>, role: impl Into<Role>) -> Self {
        Self {
            id: EmployeeId(id),
            name: name.into(),
            role: role.into(),
            ratings: SkillRatings::new(),
        }
    }

    /// Adds a rating for a role.
    pub fn with_rating(mut self, role: impl Into<Role>, rating: i32) -> Self {
        self.ratings.set(role.into(), rating);
        self
    }

    /// Rating under `role` ([`MISSING_RATING`] if unrated).
    pub fn rating_for(&self, role: &Role) -> i32 {
        self.ratings.rating(role)
    }
}

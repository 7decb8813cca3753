//! Core types for team management.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::RosterError;

/// A team is a named group of users that owns projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier.
    pub id: i32,
    /// Human-readable team name.
    pub name: String,
    /// When the team was created.
    pub created_at: DateTime<Utc>,
    /// When the team was last renamed.
    pub updated_at: DateTime<Utc>,
}

/// Role a user holds within a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    /// May edit the team, its roles and its projects.
    Manager,
    /// May view the team and leave it.
    Member,
}

impl RoleName {
    /// Convert to string for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Member => "member",
        }
    }

    pub fn is_manager(&self) -> bool {
        matches!(self, Self::Manager)
    }
}

impl FromStr for RoleName {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Self::Manager),
            "member" => Ok(Self::Member),
            other => Err(RosterError::InvalidRole(other.to_owned())),
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Links a user to a team with a role.
///
/// The role is stored as a string, the way it is persisted, and parsed on
/// demand with [`TeamRole::parse_role`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRole {
    /// Unique identifier.
    pub id: i32,
    /// The team this role belongs to.
    pub team_id: i32,
    /// The user holding the role.
    pub user_id: i32,
    /// The role name as stored.
    pub role: String,
    /// When the user joined the team.
    pub created_at: DateTime<Utc>,
    /// When the role was last changed.
    pub updated_at: DateTime<Utc>,
}

impl TeamRole {
    /// Parse the stored role string.
    ///
    /// Returns `None` if the role string is not recognized.
    pub fn parse_role(&self) -> Option<RoleName> {
        self.role.parse().ok()
    }

    /// True if the stored role is exactly `manager`.
    pub fn is_manager(&self) -> bool {
        self.parse_role().is_some_and(|r| r.is_manager())
    }
}

/// A project owned by a single team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i32,
    pub team_id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

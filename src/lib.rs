//! Team membership, role management and authorization.
//!
//! Users join teams through [`TeamRole`](teams::TeamRole) records that carry a
//! role name, either `manager` or `member`. Managers may edit a team, any
//! member may view or leave it, and a team that still has members always keeps
//! at least one manager.
//!
//! Storage is abstracted behind async repository traits; in-memory
//! implementations ship with the crate. Every operation is an action type with
//! an `execute` method, and request handlers are expected to call
//! [`AuthorizationGate::authorize`](teams::AuthorizationGate::authorize)
//! before running a mutating action.
//!
//! ```rust,ignore
//! use roster::teams::{AuthorizationGate, LeaveTeamAction, TeamAction, TeamLocks};
//!
//! let gate = AuthorizationGate::new(role_repo.clone());
//! gate.authorize(user.id, team.id, TeamAction::Leave).await?;
//!
//! let leave = LeaveTeamAction::new(role_repo, TeamLocks::new());
//! match leave.execute(team.id, user.id).await {
//!     Err(RosterError::NoManagersInTeam) => { /* show the message, nothing changed */ }
//!     other => other?,
//! }
//! ```

pub mod config;
pub mod events;
pub mod messages;
pub mod teams;
pub mod validators;

mod users;

pub use config::{MembershipConfig, MessageConfig};
pub use events::{register_event_listeners, RosterEvent};
pub use users::{InMemoryUserDirectory, User, UserDirectory};
pub use validators::ValidationError;

use std::fmt;

/// Errors returned by roster repositories and actions.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterError {
    /// The referenced team, role record, user or message does not exist.
    NotFound,
    /// The user already holds a role on the team.
    DuplicateMembership,
    /// The role name is not one of the recognized roles.
    InvalidRole(String),
    /// The change would leave a team with members but without a manager.
    NoManagersInTeam,
    /// The acting user lacks the permission required for the action.
    Forbidden,
    /// Input failed validation.
    Validation(ValidationError),
    /// The storage backend failed.
    DatabaseError(String),
}

impl RosterError {
    /// Returns true for errors meant to be shown to the end user as a
    /// message rather than mapped to a status page.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::NoManagersInTeam | Self::InvalidRole(_) | Self::Validation(_)
        )
    }
}

impl std::error::Error for RosterError {}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "Not found"),
            Self::DuplicateMembership => write!(f, "User is already a member of this team"),
            Self::InvalidRole(role) => write!(f, "Invalid role: {role}"),
            Self::NoManagersInTeam => {
                write!(f, "A team with members must keep at least one manager")
            }
            Self::Forbidden => write!(f, "Not authorized"),
            Self::Validation(err) => write!(f, "Validation error: {err}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
        }
    }
}

impl From<ValidationError> for RosterError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

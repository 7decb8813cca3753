//! Team-scoped permission checks.
//!
//! The gate only reads the role registry. Request handlers call
//! [`AuthorizationGate::authorize`] before running a mutating action.

use super::repository::TeamRoleRepository;
use crate::RosterError;

/// What a user must hold on a team to perform an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The `manager` role.
    Edit,
    /// Any role.
    Any,
}

/// A team-scoped operation a request handler wants to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamAction {
    Rename,
    ManageMembers,
    ChangeRole,
    RemoveMember,
    Delete,
    AddProject,
    View,
    ListProjects,
    Leave,
}

impl TeamAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rename => "rename",
            Self::ManageMembers => "manage_members",
            Self::ChangeRole => "change_role",
            Self::RemoveMember => "remove_member",
            Self::Delete => "delete",
            Self::AddProject => "add_project",
            Self::View => "view",
            Self::ListProjects => "list_projects",
            Self::Leave => "leave",
        }
    }

    /// The capability this action requires.
    pub fn required(&self) -> Capability {
        match self {
            Self::Rename
            | Self::ManageMembers
            | Self::ChangeRole
            | Self::RemoveMember
            | Self::Delete
            | Self::AddProject => Capability::Edit,
            Self::View | Self::ListProjects | Self::Leave => Capability::Any,
        }
    }
}

/// Decides allow/deny from the role registry. Has no side effects.
#[derive(Clone)]
pub struct AuthorizationGate<R: TeamRoleRepository> {
    role_repo: R,
}

impl<R: TeamRoleRepository> AuthorizationGate<R> {
    pub fn new(role_repo: R) -> Self {
        Self { role_repo }
    }

    /// True iff the user's role on the team is exactly `manager`.
    pub async fn has_edit_permission(&self, user_id: i32, team_id: i32) -> Result<bool, RosterError> {
        Ok(self
            .role_repo
            .find_by_team_and_user(team_id, user_id)
            .await?
            .is_some_and(|r| r.is_manager()))
    }

    /// True iff the user holds any role on the team.
    pub async fn has_any_permission(&self, user_id: i32, team_id: i32) -> Result<bool, RosterError> {
        Ok(self
            .role_repo
            .find_by_team_and_user(team_id, user_id)
            .await?
            .is_some())
    }

    /// Returns `Err(RosterError::Forbidden)` unless the user may perform `action`.
    pub async fn authorize(
        &self,
        user_id: i32,
        team_id: i32,
        action: TeamAction,
    ) -> Result<(), RosterError> {
        let allowed = match action.required() {
            Capability::Edit => self.has_edit_permission(user_id, team_id).await?,
            Capability::Any => self.has_any_permission(user_id, team_id).await?,
        };

        if allowed {
            Ok(())
        } else {
            log::info!(
                target: "roster",
                "msg=\"permission denied\", user_id={user_id}, team_id={team_id}, action=\"{}\"",
                action.as_str()
            );
            Err(RosterError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::{InMemoryTeamRoleRepository, RoleName};

    async fn setup() -> AuthorizationGate<InMemoryTeamRoleRepository> {
        let repo = InMemoryTeamRoleRepository::new();
        repo.add(1, 10, RoleName::Manager).await.unwrap();
        repo.add(1, 11, RoleName::Member).await.unwrap();
        AuthorizationGate::new(repo)
    }

    #[tokio::test]
    async fn test_edit_permission() {
        let gate = setup().await;

        assert!(gate.has_edit_permission(10, 1).await.unwrap());
        assert!(!gate.has_edit_permission(11, 1).await.unwrap());
        assert!(!gate.has_edit_permission(12, 1).await.unwrap());
        assert!(!gate.has_edit_permission(10, 2).await.unwrap());
    }

    #[tokio::test]
    async fn test_any_permission() {
        let gate = setup().await;

        assert!(gate.has_any_permission(10, 1).await.unwrap());
        assert!(gate.has_any_permission(11, 1).await.unwrap());
        assert!(!gate.has_any_permission(12, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_authorize() {
        let gate = setup().await;

        assert!(gate.authorize(10, 1, TeamAction::Delete).await.is_ok());
        assert_eq!(
            gate.authorize(11, 1, TeamAction::Rename).await.unwrap_err(),
            RosterError::Forbidden
        );
        assert!(gate.authorize(11, 1, TeamAction::Leave).await.is_ok());
        assert!(gate.authorize(11, 1, TeamAction::ListProjects).await.is_ok());
        assert_eq!(
            gate.authorize(12, 1, TeamAction::View).await.unwrap_err(),
            RosterError::Forbidden
        );
    }

    #[test]
    fn test_required_capabilities() {
        assert_eq!(TeamAction::AddProject.required(), Capability::Edit);
        assert_eq!(TeamAction::ChangeRole.required(), Capability::Edit);
        assert_eq!(TeamAction::View.required(), Capability::Any);
        assert_eq!(TeamAction::Leave.required(), Capability::Any);
    }
}

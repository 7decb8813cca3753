use chrono::Utc;

use super::ensure_manager_remains;
use crate::events::{dispatch, RosterEvent};
use crate::teams::invariant::RoleChange;
use crate::teams::{RoleName, TeamLocks, TeamRole, TeamRoleRepository};
use crate::RosterError;

/// Action to change a member's role within a team.
///
/// Demoting the last manager of a team is rejected with
/// [`RosterError::NoManagersInTeam`].
pub struct ChangeRoleAction<R: TeamRoleRepository> {
    role_repo: R,
    locks: TeamLocks,
}

impl<R: TeamRoleRepository> ChangeRoleAction<R> {
    pub fn new(role_repo: R, locks: TeamLocks) -> Self {
        Self { role_repo, locks }
    }

    /// Sets the role of record `team_role_id` on team `team_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(record)` - The updated record (unchanged if the role was already set)
    /// - `Err(RosterError::InvalidRole)` - `new_role` is not `manager` or `member`
    /// - `Err(RosterError::NotFound)` - No such record on this team
    /// - `Err(RosterError::NoManagersInTeam)` - Would demote the last manager
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "change_role", skip_all, err)
    )]
    pub async fn execute(
        &self,
        team_id: i32,
        team_role_id: i32,
        new_role: &str,
    ) -> Result<TeamRole, RosterError> {
        let role: RoleName = new_role.parse()?;

        let _guard = self.locks.acquire(team_id).await;

        let record = self
            .role_repo
            .find_by_id(team_role_id)
            .await?
            .filter(|r| r.team_id == team_id)
            .ok_or(RosterError::NotFound)?;

        if record.parse_role() == Some(role) {
            return Ok(record);
        }

        if record.is_manager() {
            ensure_manager_remains(&self.role_repo, &record, RoleChange::Demote(record.id)).await?;
        }

        let updated = self.role_repo.set_role(record.id, role).await?;

        log::info!(
            target: "roster",
            "msg=\"role changed\", team_id={team_id}, user_id={}, from=\"{}\", to=\"{role}\"",
            record.user_id,
            record.role
        );

        dispatch(RosterEvent::RoleChanged {
            team_id,
            user_id: record.user_id,
            from: record.role,
            to: role,
            at: Utc::now(),
        })
        .await;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::InMemoryTeamRoleRepository;

    #[tokio::test]
    async fn test_promote_member() {
        let repo = InMemoryTeamRoleRepository::new();
        repo.add(1, 10, RoleName::Manager).await.unwrap();
        let member = repo.add(1, 11, RoleName::Member).await.unwrap();

        let action = ChangeRoleAction::new(repo.clone(), TeamLocks::new());
        let updated = action.execute(1, member.id, "manager").await.unwrap();

        assert_eq!(updated.role, "manager");
        assert_eq!(repo.managers_of(1).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_role_leaves_record_unchanged() {
        let repo = InMemoryTeamRoleRepository::new();
        let member = repo.add(1, 11, RoleName::Member).await.unwrap();

        let action = ChangeRoleAction::new(repo.clone(), TeamLocks::new());
        let result = action.execute(1, member.id, "owner").await;

        assert_eq!(result.unwrap_err(), RosterError::InvalidRole("owner".to_owned()));
        assert_eq!(repo.find_by_id(member.id).await.unwrap(), Some(member));
    }

    #[tokio::test]
    async fn test_demote_last_manager_rejected() {
        let repo = InMemoryTeamRoleRepository::new();
        let manager = repo.add(1, 10, RoleName::Manager).await.unwrap();
        repo.add(1, 11, RoleName::Member).await.unwrap();

        let action = ChangeRoleAction::new(repo.clone(), TeamLocks::new());
        let result = action.execute(1, manager.id, "member").await;

        assert_eq!(result.unwrap_err(), RosterError::NoManagersInTeam);
        assert!(repo.find_by_id(manager.id).await.unwrap().unwrap().is_manager());
    }

    #[tokio::test]
    async fn test_demote_with_other_manager() {
        let repo = InMemoryTeamRoleRepository::new();
        let first = repo.add(1, 10, RoleName::Manager).await.unwrap();
        repo.add(1, 11, RoleName::Manager).await.unwrap();

        let action = ChangeRoleAction::new(repo.clone(), TeamLocks::new());
        let updated = action.execute(1, first.id, "member").await.unwrap();

        assert_eq!(updated.role, "member");
        assert_eq!(repo.managers_of(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_record_from_other_team() {
        let repo = InMemoryTeamRoleRepository::new();
        let other = repo.add(2, 10, RoleName::Member).await.unwrap();

        let action = ChangeRoleAction::new(repo, TeamLocks::new());
        let result = action.execute(1, other.id, "manager").await;

        assert_eq!(result.unwrap_err(), RosterError::NotFound);
    }

    #[tokio::test]
    async fn test_same_role_is_noop() {
        let repo = InMemoryTeamRoleRepository::new();
        let manager = repo.add(1, 10, RoleName::Manager).await.unwrap();

        let action = ChangeRoleAction::new(repo, TeamLocks::new());
        let result = action.execute(1, manager.id, "manager").await.unwrap();

        assert_eq!(result, manager);
    }
}

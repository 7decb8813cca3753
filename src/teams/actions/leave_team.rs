use chrono::Utc;

use super::ensure_manager_remains;
use crate::events::{dispatch, RosterEvent};
use crate::teams::invariant::RoleChange;
use crate::teams::{TeamLocks, TeamRole, TeamRoleRepository};
use crate::RosterError;

/// Action for a user to leave a team.
///
/// This action:
/// 1. Locks the team's membership
/// 2. Finds the caller's role record
/// 3. Checks the team keeps a manager if it keeps members
/// 4. Removes the record
///
/// On [`RosterError::NoManagersInTeam`] nothing is changed; the caller
/// should show the user a message and keep them on the team.
pub struct LeaveTeamAction<R: TeamRoleRepository> {
    role_repo: R,
    locks: TeamLocks,
}

impl<R: TeamRoleRepository> LeaveTeamAction<R> {
    pub fn new(role_repo: R, locks: TeamLocks) -> Self {
        Self { role_repo, locks }
    }

    /// Removes `user_id` from team `team_id` and returns the removed record.
    ///
    /// # Returns
    ///
    /// - `Ok(record)` - The user left the team
    /// - `Err(RosterError::NotFound)` - The user holds no role on the team
    /// - `Err(RosterError::NoManagersInTeam)` - The user is the last manager
    ///   and other members remain
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "leave_team", skip_all, err)
    )]
    pub async fn execute(&self, team_id: i32, user_id: i32) -> Result<TeamRole, RosterError> {
        let _guard = self.locks.acquire(team_id).await;

        let record = self
            .role_repo
            .find_by_team_and_user(team_id, user_id)
            .await?
            .ok_or(RosterError::NotFound)?;

        ensure_manager_remains(&self.role_repo, &record, RoleChange::Remove(record.id)).await?;

        self.role_repo.remove(record.id).await?;

        log::info!(
            target: "roster",
            "msg=\"member left team\", team_id={team_id}, user_id={user_id}, role=\"{}\"",
            record.role
        );

        dispatch(RosterEvent::MemberLeft {
            team_id,
            user_id,
            at: Utc::now(),
        })
        .await;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::teams::{InMemoryTeamRoleRepository, RoleName};

    #[tokio::test]
    async fn test_member_leaves() {
        let repo = InMemoryTeamRoleRepository::new();
        repo.add(1, 10, RoleName::Manager).await.unwrap();
        repo.add(1, 11, RoleName::Member).await.unwrap();

        let action = LeaveTeamAction::new(repo.clone(), TeamLocks::new());
        let removed = action.execute(1, 11).await.unwrap();

        assert_eq!(removed.user_id, 11);
        assert!(repo.find_by_team_and_user(1, 11).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sole_manager_cannot_leave() {
        let repo = InMemoryTeamRoleRepository::new();
        repo.add(1, 10, RoleName::Manager).await.unwrap();
        repo.add(1, 11, RoleName::Member).await.unwrap();
        let before = repo.snapshot();

        let action = LeaveTeamAction::new(repo.clone(), TeamLocks::new());
        let result = action.execute(1, 10).await;

        assert_eq!(result.unwrap_err(), RosterError::NoManagersInTeam);
        assert_eq!(repo.snapshot(), before);
    }

    #[tokio::test]
    async fn test_manager_leaves_when_another_remains() {
        let repo = InMemoryTeamRoleRepository::new();
        repo.add(1, 10, RoleName::Manager).await.unwrap();
        repo.add(1, 11, RoleName::Manager).await.unwrap();
        repo.add(1, 12, RoleName::Member).await.unwrap();

        let action = LeaveTeamAction::new(repo.clone(), TeamLocks::new());
        action.execute(1, 10).await.unwrap();

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.managers_of(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_last_person_may_leave() {
        let repo = InMemoryTeamRoleRepository::new();
        repo.add(1, 10, RoleName::Manager).await.unwrap();

        let action = LeaveTeamAction::new(repo.clone(), TeamLocks::new());
        action.execute(1, 10).await.unwrap();

        assert!(repo.members_of(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_not_a_member() {
        let repo = InMemoryTeamRoleRepository::new();
        repo.add(1, 10, RoleName::Manager).await.unwrap();

        let action = LeaveTeamAction::new(repo, TeamLocks::new());
        assert_eq!(action.execute(1, 99).await.unwrap_err(), RosterError::NotFound);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_manager_leaves() {
        let repo = InMemoryTeamRoleRepository::new();
        repo.add(1, 10, RoleName::Manager).await.unwrap();
        repo.add(1, 11, RoleName::Manager).await.unwrap();
        repo.add(1, 12, RoleName::Member).await.unwrap();

        let action = Arc::new(LeaveTeamAction::new(repo.clone(), TeamLocks::new()));

        let handles: Vec<_> = [10, 11]
            .into_iter()
            .map(|user_id| {
                let action = Arc::clone(&action);
                tokio::spawn(async move { action.execute(1, user_id).await })
            })
            .collect();

        let mut succeeded = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(e) => assert_eq!(e, RosterError::NoManagersInTeam),
            }
        }

        assert_eq!(succeeded, 1);
        assert_eq!(repo.managers_of(1).await.unwrap().len(), 1);
    }
}

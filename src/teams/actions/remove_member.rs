use chrono::Utc;

use super::ensure_manager_remains;
use crate::events::{dispatch, RosterEvent};
use crate::teams::invariant::RoleChange;
use crate::teams::{TeamLocks, TeamRole, TeamRoleRepository};
use crate::RosterError;

/// Action for a manager to remove a role record from a team.
///
/// Applies the same last-manager guard as [`LeaveTeamAction`](super::LeaveTeamAction).
pub struct RemoveMemberAction<R: TeamRoleRepository> {
    role_repo: R,
    locks: TeamLocks,
}

impl<R: TeamRoleRepository> RemoveMemberAction<R> {
    pub fn new(role_repo: R, locks: TeamLocks) -> Self {
        Self { role_repo, locks }
    }

    /// Removes record `team_role_id` from team `team_id` and returns it.
    ///
    /// # Returns
    ///
    /// - `Ok(record)` - The removed record
    /// - `Err(RosterError::NotFound)` - No such record on this team
    /// - `Err(RosterError::NoManagersInTeam)` - Would remove the last manager
    ///   of a team that keeps other members
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "remove_member", skip_all, err)
    )]
    pub async fn execute(&self, team_id: i32, team_role_id: i32) -> Result<TeamRole, RosterError> {
        let _guard = self.locks.acquire(team_id).await;

        let record = self
            .role_repo
            .find_by_id(team_role_id)
            .await?
            .filter(|r| r.team_id == team_id)
            .ok_or(RosterError::NotFound)?;

        ensure_manager_remains(&self.role_repo, &record, RoleChange::Remove(record.id)).await?;

        self.role_repo.remove(record.id).await?;

        log::info!(
            target: "roster",
            "msg=\"member removed\", team_id={team_id}, user_id={}, role=\"{}\"",
            record.user_id,
            record.role
        );

        dispatch(RosterEvent::MemberRemoved {
            team_id,
            user_id: record.user_id,
            at: Utc::now(),
        })
        .await;

        Ok(record)
    }
}

use chrono::Utc;

use crate::events::{dispatch, RosterEvent};
use crate::teams::{ProjectRepository, TeamLocks, TeamRepository, TeamRoleRepository};
use crate::RosterError;

/// Action to delete a team together with its role records and projects.
///
/// Children are removed explicitly before the team itself, while holding
/// the team lock. The lock entry is kept: actions still waiting on it see
/// the team gone and fail with [`RosterError::NotFound`].
pub struct DeleteTeamAction<T, R, P>
where
    T: TeamRepository,
    R: TeamRoleRepository,
    P: ProjectRepository,
{
    team_repo: T,
    role_repo: R,
    project_repo: P,
    locks: TeamLocks,
}

impl<T, R, P> DeleteTeamAction<T, R, P>
where
    T: TeamRepository,
    R: TeamRoleRepository,
    P: ProjectRepository,
{
    pub fn new(team_repo: T, role_repo: R, project_repo: P, locks: TeamLocks) -> Self {
        Self {
            team_repo,
            role_repo,
            project_repo,
            locks,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "delete_team", skip_all, err)
    )]
    pub async fn execute(&self, team_id: i32) -> Result<(), RosterError> {
        let _guard = self.locks.acquire(team_id).await;

        self.team_repo
            .find_by_id(team_id)
            .await?
            .ok_or(RosterError::NotFound)?;

        let roles_removed = self.role_repo.remove_all_for_team(team_id).await?;
        let projects_removed = self.project_repo.delete_by_team(team_id).await?;
        self.team_repo.delete(team_id).await?;

        log::info!(
            target: "roster",
            "msg=\"team deleted\", team_id={team_id}, roles_removed={roles_removed}, projects_removed={projects_removed}"
        );

        dispatch(RosterEvent::TeamDeleted {
            team_id,
            roles_removed,
            projects_removed,
            at: Utc::now(),
        })
        .await;

        Ok(())
    }
}

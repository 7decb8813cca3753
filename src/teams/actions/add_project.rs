use chrono::Utc;

use crate::events::{dispatch, RosterEvent};
use crate::teams::{CreateProject, Project, ProjectRepository, TeamLocks, TeamRepository};
use crate::validators::validate_project_name;
use crate::RosterError;

/// Action to create a project owned by a team.
///
/// Runs under the team lock so it cannot interleave with a team delete.
pub struct AddProjectAction<T: TeamRepository, P: ProjectRepository> {
    team_repo: T,
    project_repo: P,
    locks: TeamLocks,
}

impl<T: TeamRepository, P: ProjectRepository> AddProjectAction<T, P> {
    pub fn new(team_repo: T, project_repo: P, locks: TeamLocks) -> Self {
        Self {
            team_repo,
            project_repo,
            locks,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "add_project", skip_all, err)
    )]
    pub async fn execute(&self, team_id: i32, name: &str) -> Result<Project, RosterError> {
        validate_project_name(name)?;

        let _guard = self.locks.acquire(team_id).await;

        self.team_repo
            .find_by_id(team_id)
            .await?
            .ok_or(RosterError::NotFound)?;

        let project = self
            .project_repo
            .create(CreateProject {
                team_id,
                name: name.trim().to_owned(),
            })
            .await?;

        log::info!(
            target: "roster",
            "msg=\"project created\", team_id={team_id}, project_id={}",
            project.id
        );

        dispatch(RosterEvent::ProjectCreated {
            team_id,
            project_id: project.id,
            at: Utc::now(),
        })
        .await;

        Ok(project)
    }
}

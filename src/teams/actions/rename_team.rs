use chrono::Utc;

use crate::events::{dispatch, RosterEvent};
use crate::teams::{Team, TeamRepository};
use crate::validators::validate_team_name;
use crate::RosterError;

pub struct RenameTeamAction<T: TeamRepository> {
    team_repo: T,
}

impl<T: TeamRepository> RenameTeamAction<T> {
    pub fn new(team_repo: T) -> Self {
        Self { team_repo }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "rename_team", skip_all, err)
    )]
    pub async fn execute(&self, team_id: i32, new_name: &str) -> Result<Team, RosterError> {
        validate_team_name(new_name)?;

        let team = self.team_repo.rename(team_id, new_name.trim()).await?;

        dispatch(RosterEvent::TeamRenamed {
            team_id,
            name: team.name.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::{CreateTeam, InMemoryTeamRepository};
    use crate::validators::ValidationError;

    #[tokio::test]
    async fn test_rename() {
        let repo = InMemoryTeamRepository::new();
        let team = repo
            .create(CreateTeam {
                name: "Old".into(),
            })
            .await
            .unwrap();

        let action = RenameTeamAction::new(repo);
        let renamed = action.execute(team.id, "New ").await.unwrap();
        assert_eq!(renamed.name, "New");
    }

    #[tokio::test]
    async fn test_rename_invalid() {
        let action = RenameTeamAction::new(InMemoryTeamRepository::new());

        assert_eq!(
            action.execute(1, "").await.unwrap_err(),
            RosterError::Validation(ValidationError::TeamNameEmpty)
        );
        assert_eq!(action.execute(1, "Fine").await.unwrap_err(), RosterError::NotFound);
    }
}

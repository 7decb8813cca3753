use chrono::Utc;

use super::add_members::{add_by_handles, announce_added};
use crate::config::MembershipConfig;
use crate::events::{dispatch, RosterEvent};
use crate::teams::{
    CreateTeam, RoleName, Team, TeamLocks, TeamRepository, TeamRole, TeamRoleRepository,
};
use crate::validators::validate_team_name;
use crate::{RosterError, UserDirectory};

/// Output from creating a team.
#[derive(Debug, Clone)]
pub struct CreateTeamOutput {
    pub team: Team,
    /// The creator's manager record first, then every member added by handle.
    pub roles: Vec<TeamRole>,
    /// Handles that did not resolve to a user.
    pub not_found: Vec<String>,
}

/// Action to create a team.
///
/// The creator becomes the team's first manager. Initial members may be
/// given by handle; they are added the same way
/// [`AddMembersByHandlesAction`](super::AddMembersByHandlesAction) adds them.
pub struct CreateTeamAction<T, R, U>
where
    T: TeamRepository,
    R: TeamRoleRepository,
    U: UserDirectory,
{
    team_repo: T,
    role_repo: R,
    users: U,
    locks: TeamLocks,
    config: MembershipConfig,
}

impl<T, R, U> CreateTeamAction<T, R, U>
where
    T: TeamRepository,
    R: TeamRoleRepository,
    U: UserDirectory,
{
    pub fn new(team_repo: T, role_repo: R, users: U, locks: TeamLocks) -> Self {
        Self::with_config(team_repo, role_repo, users, locks, MembershipConfig::default())
    }

    pub fn with_config(
        team_repo: T,
        role_repo: R,
        users: U,
        locks: TeamLocks,
        config: MembershipConfig,
    ) -> Self {
        Self {
            team_repo,
            role_repo,
            users,
            locks,
            config,
        }
    }

    /// Creates a team named `name` managed by `creator_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(output)` - The team, its role records and unresolved handles
    /// - `Err(RosterError::Validation(_))` - Bad name or too many handles
    /// - `Err(RosterError::NotFound)` - The creator does not exist
    /// - `Err(_)` - Storage error; the team and any role records already
    ///   written are removed again
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_team", skip_all, err)
    )]
    pub async fn execute<S: AsRef<str>>(
        &self,
        creator_id: i32,
        name: &str,
        handles: &[S],
    ) -> Result<CreateTeamOutput, RosterError> {
        validate_team_name(name)?;

        if handles.len() > self.config.max_handles_per_request {
            return Err(crate::ValidationError::TooManyHandles {
                max: self.config.max_handles_per_request,
            }
            .into());
        }

        self.users
            .find_by_id(creator_id)
            .await?
            .ok_or(RosterError::NotFound)?;

        let team = self
            .team_repo
            .create(CreateTeam {
                name: name.trim().to_owned(),
            })
            .await?;

        let _guard = self.locks.acquire(team.id).await;

        let populated = async {
            let manager = self
                .role_repo
                .add(team.id, creator_id, RoleName::Manager)
                .await?;
            let added =
                add_by_handles(&self.role_repo, &self.users, &self.config, team.id, handles)
                    .await?;
            Ok::<_, RosterError>((manager, added))
        }
        .await;

        let (manager, added) = match populated {
            Ok(populated) => populated,
            Err(e) => {
                self.roll_back(team.id).await;
                return Err(e);
            }
        };

        dispatch(RosterEvent::TeamCreated {
            team_id: team.id,
            creator_id,
            at: Utc::now(),
        })
        .await;
        announce_added(team.id, std::slice::from_ref(&manager)).await;
        announce_added(team.id, &added.added).await;

        log::info!(
            target: "roster",
            "msg=\"team created\", team_id={}, creator_id={creator_id}, members={}",
            team.id,
            added.added.len() + 1
        );

        let mut roles = Vec::with_capacity(added.added.len() + 1);
        roles.push(manager);
        roles.extend(added.added);

        Ok(CreateTeamOutput {
            team,
            roles,
            not_found: added.not_found,
        })
    }

    /// Removes a team whose members could not all be stored.
    async fn roll_back(&self, team_id: i32) {
        if let Err(e) = self.role_repo.remove_all_for_team(team_id).await {
            log::warn!(
                target: "roster",
                "msg=\"rollback failed to remove roles\", team_id={team_id}, error=\"{e}\""
            );
        }
        if let Err(e) = self.team_repo.delete(team_id).await {
            log::warn!(
                target: "roster",
                "msg=\"rollback failed to remove team\", team_id={team_id}, error=\"{e}\""
            );
        }
    }
}

use std::collections::HashSet;

use chrono::Utc;

use crate::config::MembershipConfig;
use crate::events::{dispatch, RosterEvent};
use crate::teams::{RoleName, TeamLocks, TeamRepository, TeamRole, TeamRoleRepository};
use crate::validators::ValidationError;
use crate::{RosterError, UserDirectory};

/// Result of a bulk add.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddMembersOutput {
    /// Records created by this call.
    pub added: Vec<TeamRole>,
    /// Handles that did not resolve to a user, in request order.
    pub not_found: Vec<String>,
}

/// Action to add users to a team by their handles.
///
/// This action:
/// 1. Verifies the team exists
/// 2. Resolves each handle through the user directory
/// 3. Adds every resolved user not already on the team
///
/// Unknown handles are reported, not fatal. Users who already belong to the
/// team and repeated handles are skipped silently, so the call is
/// idempotent. When the team has no manager yet, the first user added
/// becomes its manager.
pub struct AddMembersByHandlesAction<T, R, U>
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

impl<T, R, U> AddMembersByHandlesAction<T, R, U>
where
    T: TeamRepository,
    R: TeamRoleRepository,
    U: UserDirectory,
{
    /// Creates a new `AddMembersByHandlesAction` with default configuration.
    pub fn new(team_repo: T, role_repo: R, users: U, locks: TeamLocks) -> Self {
        Self::with_config(team_repo, role_repo, users, locks, MembershipConfig::default())
    }

    /// Creates a new `AddMembersByHandlesAction` with custom configuration.
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

    /// Adds the users named by `handles` to the team.
    ///
    /// # Returns
    ///
    /// - `Ok(output)` - Added records and unresolved handles
    /// - `Err(RosterError::NotFound)` - Team does not exist
    /// - `Err(RosterError::Validation(TooManyHandles))` - Request too large
    /// - `Err(_)` - Storage errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "add_members_by_handles", skip_all, err)
    )]
    pub async fn execute<S: AsRef<str>>(
        &self,
        team_id: i32,
        handles: &[S],
    ) -> Result<AddMembersOutput, RosterError> {
        let _guard = self.locks.acquire(team_id).await;

        // checked under the guard so a concurrent delete cannot slip in
        self.team_repo
            .find_by_id(team_id)
            .await?
            .ok_or(RosterError::NotFound)?;

        let output =
            add_by_handles(&self.role_repo, &self.users, &self.config, team_id, handles).await?;
        announce_added(team_id, &output.added).await;

        Ok(output)
    }
}

/// Adds users by handle. The caller must hold the team lock and announce
/// the added records with [`announce_added`] once its own work commits.
pub(super) async fn add_by_handles<R, U, S>(
    role_repo: &R,
    users: &U,
    config: &MembershipConfig,
    team_id: i32,
    handles: &[S],
) -> Result<AddMembersOutput, RosterError>
where
    R: TeamRoleRepository,
    U: UserDirectory,
    S: AsRef<str>,
{
    if handles.len() > config.max_handles_per_request {
        return Err(ValidationError::TooManyHandles {
            max: config.max_handles_per_request,
        }
        .into());
    }

    let mut needs_manager = !role_repo
        .members_of(team_id)
        .await?
        .iter()
        .any(TeamRole::is_manager);

    let mut output = AddMembersOutput::default();
    let mut seen = HashSet::new();

    for handle in handles.iter().map(|h| h.as_ref().trim()) {
        if handle.is_empty() || !seen.insert(handle) {
            continue;
        }

        let Some(user) = users.find_by_handle(handle).await? else {
            output.not_found.push(handle.to_owned());
            continue;
        };

        let role = if needs_manager {
            RoleName::Manager
        } else {
            config.default_role
        };

        match role_repo.add(team_id, user.id, role).await {
            Ok(record) => {
                needs_manager = needs_manager && !record.is_manager();
                output.added.push(record);
            }
            Err(RosterError::DuplicateMembership) => {
                log::debug!(
                    target: "roster",
                    "msg=\"already a member, skipping\", team_id={team_id}, user_id={}",
                    user.id
                );
            }
            Err(e) => return Err(e),
        }
    }

    log::info!(
        target: "roster",
        "msg=\"members added\", team_id={team_id}, added={}, not_found={}",
        output.added.len(),
        output.not_found.len()
    );

    Ok(output)
}

pub(super) async fn announce_added(team_id: i32, added: &[TeamRole]) {
    for record in added {
        if let Some(role) = record.parse_role() {
            dispatch(RosterEvent::MemberAdded {
                team_id,
                user_id: record.user_id,
                role,
                at: Utc::now(),
            })
            .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::{CreateTeam, InMemoryTeamRepository, InMemoryTeamRoleRepository};
    use crate::InMemoryUserDirectory;

    struct Fixture {
        team_id: i32,
        roles: InMemoryTeamRoleRepository,
        action: AddMembersByHandlesAction<
            InMemoryTeamRepository,
            InMemoryTeamRoleRepository,
            InMemoryUserDirectory,
        >,
    }

    async fn setup(config: MembershipConfig) -> Fixture {
        let teams = InMemoryTeamRepository::new();
        let roles = InMemoryTeamRoleRepository::new();
        let users = InMemoryUserDirectory::new();

        for name in ["alice", "bob", "carol"] {
            users.add_user(name, &format!("{name}@example.com")).unwrap();
        }

        let team = teams
            .create(CreateTeam {
                name: "Platform".into(),
            })
            .await
            .unwrap();

        let action = AddMembersByHandlesAction::with_config(
            teams,
            roles.clone(),
            users,
            TeamLocks::new(),
            config,
        );

        Fixture {
            team_id: team.id,
            roles,
            action,
        }
    }

    #[tokio::test]
    async fn test_partial_success() {
        let fx = setup(MembershipConfig::default()).await;
        // alice manages the team already
        fx.roles.add(fx.team_id, 1, RoleName::Manager).await.unwrap();

        let output = fx
            .action
            .execute(fx.team_id, &["bob", "nobody", "carol", "ghost"])
            .await
            .unwrap();

        assert_eq!(output.added.len(), 2);
        assert!(output.added.iter().all(|r| r.role == "member"));
        assert_eq!(output.not_found, vec!["nobody".to_owned(), "ghost".to_owned()]);
    }

    #[tokio::test]
    async fn test_idempotent() {
        let fx = setup(MembershipConfig::default()).await;
        fx.roles.add(fx.team_id, 1, RoleName::Manager).await.unwrap();

        let first = fx.action.execute(fx.team_id, &["bob"]).await.unwrap();
        assert_eq!(first.added.len(), 1);

        let second = fx.action.execute(fx.team_id, &["bob", "bob"]).await.unwrap();
        assert!(second.added.is_empty());
        assert!(second.not_found.is_empty());

        assert_eq!(fx.roles.members_of(fx.team_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_first_member_of_empty_team_becomes_manager() {
        let fx = setup(MembershipConfig::default()).await;

        let output = fx.action.execute(fx.team_id, &["bob", "carol"]).await.unwrap();

        assert_eq!(output.added[0].role, "manager");
        assert_eq!(output.added[1].role, "member");
        assert_eq!(fx.roles.managers_of(fx.team_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_handles_ignored() {
        let fx = setup(MembershipConfig::default()).await;
        fx.roles.add(fx.team_id, 1, RoleName::Manager).await.unwrap();

        let output = fx.action.execute(fx.team_id, &["", "  ", " bob "]).await.unwrap();

        assert_eq!(output.added.len(), 1);
        assert!(output.not_found.is_empty());
    }

    #[tokio::test]
    async fn test_team_not_found() {
        let fx = setup(MembershipConfig::default()).await;

        let result = fx.action.execute(999, &["bob"]).await;
        assert_eq!(result.unwrap_err(), RosterError::NotFound);
    }

    #[tokio::test]
    async fn test_too_many_handles() {
        let fx = setup(MembershipConfig {
            max_handles_per_request: 2,
            ..Default::default()
        })
        .await;

        let result = fx.action.execute(fx.team_id, &["alice", "bob", "carol"]).await;
        assert_eq!(
            result.unwrap_err(),
            RosterError::Validation(ValidationError::TooManyHandles { max: 2 })
        );
        assert!(fx.roles.is_empty());
    }
}

mod add_members;
mod add_project;
mod change_role;
mod create_team;
mod delete_team;
mod leave_team;
mod remove_member;
mod rename_team;

pub use add_members::{AddMembersByHandlesAction, AddMembersOutput};
pub use add_project::AddProjectAction;
pub use change_role::ChangeRoleAction;
pub use create_team::{CreateTeamAction, CreateTeamOutput};
pub use delete_team::DeleteTeamAction;
pub use leave_team::LeaveTeamAction;
pub use remove_member::RemoveMemberAction;
pub use rename_team::RenameTeamAction;

use chrono::Utc;

use super::invariant::{leaves_team_without_manager, RoleChange};
use super::repository::TeamRoleRepository;
use super::types::TeamRole;
use crate::events::{dispatch, RosterEvent};
use crate::RosterError;

/// Rejects `change` to `record` if it would leave the team with members but
/// no manager. Must be called while holding the team lock.
async fn ensure_manager_remains<R: TeamRoleRepository>(
    role_repo: &R,
    record: &TeamRole,
    change: RoleChange,
) -> Result<(), RosterError> {
    let members = role_repo.members_of(record.team_id).await?;

    if leaves_team_without_manager(&members, change) {
        log::info!(
            target: "roster",
            "msg=\"change rejected, team would have no manager\", team_id={}, user_id={}, change={:?}",
            record.team_id,
            record.user_id,
            change
        );
        dispatch(RosterEvent::NoManagersRejected {
            team_id: record.team_id,
            user_id: record.user_id,
            at: Utc::now(),
        })
        .await;
        return Err(RosterError::NoManagersInTeam);
    }

    Ok(())
}

mod actions;
mod authorization;
mod invariant;
mod lock;
mod memory;
mod repository;
mod types;

pub use actions::{
    AddMembersByHandlesAction, AddMembersOutput, AddProjectAction, ChangeRoleAction,
    CreateTeamAction, CreateTeamOutput, DeleteTeamAction, LeaveTeamAction, RemoveMemberAction,
    RenameTeamAction,
};
pub use authorization::{AuthorizationGate, Capability, TeamAction};
pub use invariant::{leaves_team_without_manager, RoleChange};
pub use lock::TeamLocks;
pub use memory::{InMemoryProjectRepository, InMemoryTeamRepository, InMemoryTeamRoleRepository};
pub use repository::{
    CreateProject, CreateTeam, ProjectRepository, TeamRepository, TeamRoleRepository,
};
pub use types::{Project, RoleName, Team, TeamRole};

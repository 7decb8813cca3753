use async_trait::async_trait;

use super::types::{Project, RoleName, Team, TeamRole};
use crate::RosterError;

#[derive(Debug, Clone)]
pub struct CreateTeam {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct CreateProject {
    pub team_id: i32,
    pub name: String,
}

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn create(&self, data: CreateTeam) -> Result<Team, RosterError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Team>, RosterError>;
    async fn rename(&self, id: i32, name: &str) -> Result<Team, RosterError>;
    async fn delete(&self, id: i32) -> Result<(), RosterError>;
}

/// The role registry: one record per (team, user) pair.
#[async_trait]
pub trait TeamRoleRepository: Send + Sync {
    /// Fails with [`RosterError::DuplicateMembership`] if the user already
    /// holds a role on the team.
    async fn add(
        &self,
        team_id: i32,
        user_id: i32,
        role: RoleName,
    ) -> Result<TeamRole, RosterError>;
    /// Fails with [`RosterError::NotFound`] if the record does not exist.
    async fn remove(&self, id: i32) -> Result<(), RosterError>;
    /// Fails with [`RosterError::NotFound`] if the record does not exist.
    async fn set_role(&self, id: i32, role: RoleName) -> Result<TeamRole, RosterError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<TeamRole>, RosterError>;
    async fn find_by_team_and_user(
        &self,
        team_id: i32,
        user_id: i32,
    ) -> Result<Option<TeamRole>, RosterError>;
    /// All records of a team, oldest first.
    async fn members_of(&self, team_id: i32) -> Result<Vec<TeamRole>, RosterError>;
    async fn managers_of(&self, team_id: i32) -> Result<Vec<TeamRole>, RosterError>;
    /// All records held by a user, oldest first.
    async fn teams_of(&self, user_id: i32) -> Result<Vec<TeamRole>, RosterError>;
    /// Records where the user is a manager.
    async fn managed_by(&self, user_id: i32) -> Result<Vec<TeamRole>, RosterError>;
    /// Returns the number of records removed.
    async fn remove_all_for_team(&self, team_id: i32) -> Result<u64, RosterError>;
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, data: CreateProject) -> Result<Project, RosterError>;
    async fn find_by_team(&self, team_id: i32) -> Result<Vec<Project>, RosterError>;
    /// Returns the number of projects removed.
    async fn delete_by_team(&self, team_id: i32) -> Result<u64, RosterError>;
}

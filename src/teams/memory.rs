//! In-memory team storage.
//!
//! Suitable for development, testing and single-instance deployments.
//! Every repository is `Clone`; clones share the same store so several
//! actions can operate on one registry.

#![allow(clippy::significant_drop_tightening)]

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use super::repository::{
    CreateProject, CreateTeam, ProjectRepository, TeamRepository, TeamRoleRepository,
};
use super::types::{Project, RoleName, Team, TeamRole};
use crate::RosterError;

fn poisoned<T>(_: T) -> RosterError {
    RosterError::DatabaseError("Lock poisoned".to_owned())
}

fn u64_len(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

#[derive(Clone)]
pub struct InMemoryTeamRepository {
    teams: Arc<RwLock<HashMap<i32, Team>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self {
            teams: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }
}

impl Default for InMemoryTeamRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn create(&self, data: CreateTeam) -> Result<Team, RosterError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let team = Team {
            id,
            name: data.name,
            created_at: now,
            updated_at: now,
        };

        self.teams
            .write()
            .map_err(poisoned)?
            .insert(id, team.clone());

        Ok(team)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Team>, RosterError> {
        let teams = self.teams.read().map_err(poisoned)?;
        Ok(teams.get(&id).cloned())
    }

    async fn rename(&self, id: i32, name: &str) -> Result<Team, RosterError> {
        let mut teams = self.teams.write().map_err(poisoned)?;

        let team = teams.get_mut(&id).ok_or(RosterError::NotFound)?;
        name.clone_into(&mut team.name);
        team.updated_at = Utc::now();

        Ok(team.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), RosterError> {
        self.teams
            .write()
            .map_err(poisoned)?
            .remove(&id)
            .map(|_| ())
            .ok_or(RosterError::NotFound)
    }
}

/// Role records keyed by (team, user) with secondary indexes.
#[derive(Default)]
struct RoleIndex {
    records: HashMap<(i32, i32), TeamRole>,
    by_id: HashMap<i32, (i32, i32)>,
    /// team id -> user ids
    by_team: HashMap<i32, BTreeSet<i32>>,
    /// user id -> team ids
    by_user: HashMap<i32, BTreeSet<i32>>,
}

impl RoleIndex {
    fn insert(&mut self, record: TeamRole) {
        let key = (record.team_id, record.user_id);
        self.by_id.insert(record.id, key);
        self.by_team.entry(key.0).or_default().insert(key.1);
        self.by_user.entry(key.1).or_default().insert(key.0);
        self.records.insert(key, record);
    }

    fn remove_key(&mut self, key: (i32, i32)) -> Option<TeamRole> {
        let record = self.records.remove(&key)?;
        self.by_id.remove(&record.id);

        if let Some(users) = self.by_team.get_mut(&key.0) {
            users.remove(&key.1);
            if users.is_empty() {
                self.by_team.remove(&key.0);
            }
        }
        if let Some(teams) = self.by_user.get_mut(&key.1) {
            teams.remove(&key.0);
            if teams.is_empty() {
                self.by_user.remove(&key.1);
            }
        }

        Some(record)
    }

    fn of_team(&self, team_id: i32) -> Vec<TeamRole> {
        let mut roles: Vec<TeamRole> = self
            .by_team
            .get(&team_id)
            .into_iter()
            .flatten()
            .filter_map(|user_id| self.records.get(&(team_id, *user_id)).cloned())
            .collect();
        roles.sort_by_key(|r| r.id);
        roles
    }

    fn of_user(&self, user_id: i32) -> Vec<TeamRole> {
        let mut roles: Vec<TeamRole> = self
            .by_user
            .get(&user_id)
            .into_iter()
            .flatten()
            .filter_map(|team_id| self.records.get(&(*team_id, user_id)).cloned())
            .collect();
        roles.sort_by_key(|r| r.id);
        roles
    }
}

/// In-memory role registry.
#[derive(Clone)]
pub struct InMemoryTeamRoleRepository {
    index: Arc<RwLock<RoleIndex>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryTeamRoleRepository {
    pub fn new() -> Self {
        Self {
            index: Arc::new(RwLock::new(RoleIndex::default())),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }

    /// Returns a copy of every record, ordered by id.
    pub fn snapshot(&self) -> Vec<TeamRole> {
        self.index
            .read()
            .map(|index| {
                let mut all: Vec<TeamRole> = index.records.values().cloned().collect();
                all.sort_by_key(|r| r.id);
                all
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.index.read().map(|i| i.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryTeamRoleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TeamRoleRepository for InMemoryTeamRoleRepository {
    async fn add(
        &self,
        team_id: i32,
        user_id: i32,
        role: RoleName,
    ) -> Result<TeamRole, RosterError> {
        let mut index = self.index.write().map_err(poisoned)?;

        if index.records.contains_key(&(team_id, user_id)) {
            return Err(RosterError::DuplicateMembership);
        }

        let now = Utc::now();
        let record = TeamRole {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            team_id,
            user_id,
            role: role.as_str().to_owned(),
            created_at: now,
            updated_at: now,
        };
        index.insert(record.clone());

        Ok(record)
    }

    async fn remove(&self, id: i32) -> Result<(), RosterError> {
        let mut index = self.index.write().map_err(poisoned)?;

        let key = *index.by_id.get(&id).ok_or(RosterError::NotFound)?;
        index.remove_key(key);

        Ok(())
    }

    async fn set_role(&self, id: i32, role: RoleName) -> Result<TeamRole, RosterError> {
        let mut index = self.index.write().map_err(poisoned)?;

        let key = *index.by_id.get(&id).ok_or(RosterError::NotFound)?;
        let record = index.records.get_mut(&key).ok_or(RosterError::NotFound)?;
        role.as_str().clone_into(&mut record.role);
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<TeamRole>, RosterError> {
        let index = self.index.read().map_err(poisoned)?;
        Ok(index
            .by_id
            .get(&id)
            .and_then(|key| index.records.get(key))
            .cloned())
    }

    async fn find_by_team_and_user(
        &self,
        team_id: i32,
        user_id: i32,
    ) -> Result<Option<TeamRole>, RosterError> {
        let index = self.index.read().map_err(poisoned)?;
        Ok(index.records.get(&(team_id, user_id)).cloned())
    }

    async fn members_of(&self, team_id: i32) -> Result<Vec<TeamRole>, RosterError> {
        let index = self.index.read().map_err(poisoned)?;
        Ok(index.of_team(team_id))
    }

    async fn managers_of(&self, team_id: i32) -> Result<Vec<TeamRole>, RosterError> {
        let index = self.index.read().map_err(poisoned)?;
        Ok(index
            .of_team(team_id)
            .into_iter()
            .filter(TeamRole::is_manager)
            .collect())
    }

    async fn teams_of(&self, user_id: i32) -> Result<Vec<TeamRole>, RosterError> {
        let index = self.index.read().map_err(poisoned)?;
        Ok(index.of_user(user_id))
    }

    async fn managed_by(&self, user_id: i32) -> Result<Vec<TeamRole>, RosterError> {
        let index = self.index.read().map_err(poisoned)?;
        Ok(index
            .of_user(user_id)
            .into_iter()
            .filter(TeamRole::is_manager)
            .collect())
    }

    async fn remove_all_for_team(&self, team_id: i32) -> Result<u64, RosterError> {
        let mut index = self.index.write().map_err(poisoned)?;

        let users: Vec<i32> = index
            .by_team
            .get(&team_id)
            .map(|users| users.iter().copied().collect())
            .unwrap_or_default();

        let removed = users
            .into_iter()
            .filter_map(|user_id| index.remove_key((team_id, user_id)))
            .count();

        Ok(u64_len(removed))
    }
}

#[derive(Clone)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<i32, Project>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self {
            projects: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }
}

impl Default for InMemoryProjectRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, data: CreateProject) -> Result<Project, RosterError> {
        let project = Project {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            team_id: data.team_id,
            name: data.name,
            created_at: Utc::now(),
        };

        self.projects
            .write()
            .map_err(poisoned)?
            .insert(project.id, project.clone());

        Ok(project)
    }

    async fn find_by_team(&self, team_id: i32) -> Result<Vec<Project>, RosterError> {
        let projects = self.projects.read().map_err(poisoned)?;
        let mut found: Vec<Project> = projects
            .values()
            .filter(|p| p.team_id == team_id)
            .cloned()
            .collect();
        found.sort_by_key(|p| p.id);
        Ok(found)
    }

    async fn delete_by_team(&self, team_id: i32) -> Result<u64, RosterError> {
        let mut projects = self.projects.write().map_err(poisoned)?;
        let before = projects.len();
        projects.retain(|_, p| p.team_id != team_id);
        Ok(u64_len(before.saturating_sub(projects.len())))
    }
}

//! User lookup collaborator.
//!
//! Roster never owns users; it only resolves them by id or by handle.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{RosterError, ValidationError};

/// A user account as seen by roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: i32,
    /// Unique handle used to add members and address messages.
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Resolves users for membership and messaging actions.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_handle(&self, handle: &str) -> Result<Option<User>, RosterError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RosterError>;
}

/// In-memory user directory.
///
/// Cloning shares the underlying store.
#[derive(Clone)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<i32, User>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }

    /// Registers a user, failing if the handle is already taken.
    #[allow(clippy::significant_drop_tightening)]
    pub fn add_user(&self, username: &str, email: &str) -> Result<User, RosterError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| RosterError::DatabaseError("Lock poisoned".to_owned()))?;

        if users.values().any(|u| u.username == username) {
            return Err(ValidationError::HandleTaken.into());
        }

        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            username: username.to_owned(),
            email: email.to_owned(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    /// Returns the number of registered users.
    pub fn len(&self) -> usize {
        self.users.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_handle(&self, handle: &str) -> Result<Option<User>, RosterError> {
        let users = self
            .users
            .read()
            .map_err(|_| RosterError::DatabaseError("Lock poisoned".to_owned()))?;
        Ok(users.values().find(|u| u.username == handle).cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RosterError> {
        let users = self
            .users
            .read()
            .map_err(|_| RosterError::DatabaseError("Lock poisoned".to_owned()))?;
        Ok(users.get(&id).cloned())
    }
}

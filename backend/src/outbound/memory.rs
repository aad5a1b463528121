//! In-memory `UserRepository` used by tests and when no database is
//! configured.
//!
//! Users live in a `Vec` so listing preserves insertion order, matching the
//! `created_at, id` ordering of the PostgreSQL adapter.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, Role, User, UserChanges, UserId};

/// Thread-safe, process-local user store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("in-memory user store poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<UserId, UserPersistenceError> {
        let id = UserId::random();
        let stored = User::new(
            id,
            user.email.clone(),
            user.password.clone(),
            user.name.clone(),
            Role::default(),
        );
        self.lock()?.push(stored);
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.clone())
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<bool, UserPersistenceError> {
        let mut users = self.lock()?;
        let Some(user) = users.iter_mut().find(|user| user.id() == id) else {
            return Ok(false);
        };
        user.apply(changes);
        Ok(true)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut users = self.lock()?;
        let before = users.len();
        users.retain(|user| user.id() != id);
        Ok(users.len() < before)
    }
}

//! User account domain service.
//!
//! [`UserService`] implements both driving ports on top of any
//! [`UserRepository`], translating repository outcomes into domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, NewUser, User, UserChanges, UserId};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn user_not_found(id: &UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

/// User service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserService<R> {
    user_repo: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service over the given repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, user: NewUser) -> Result<UserId, Error> {
        let id = self
            .user_repo
            .insert(&user)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %id, "user created");
        Ok(id)
    }

    async fn update_user(&self, id: &UserId, changes: UserChanges) -> Result<(), Error> {
        if changes.is_empty() {
            debug!(user_id = %id, "empty update; checking existence only");
        }
        let updated = self
            .user_repo
            .update(id, &changes)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(user_not_found(id));
        }
        info!(user_id = %id, "user updated");
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        let deleted = self
            .user_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(user_not_found(id));
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let users = self.user_repo.list().await.map_err(map_repository_error)?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;

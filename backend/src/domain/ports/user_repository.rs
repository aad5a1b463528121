//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserChanges, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Storage for user accounts.
///
/// `update` and `delete` report whether a row matched so callers can tell a
/// missing user apart from a successful write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user and return the identifier assigned to it. The role
    /// defaults to [`Role::User`](crate::domain::Role::User).
    async fn insert(&self, user: &NewUser) -> Result<UserId, UserPersistenceError>;

    /// Every stored user, oldest first.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Apply `changes` to the user with `id`. Returns `false` when no such
    /// user exists.
    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<bool, UserPersistenceError>;

    /// Remove the user with `id`. Returns `false` when no such user exists.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}

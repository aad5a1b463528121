//! Driving port for user account mutations.
//!
//! Inbound adapters validate raw input into [`NewUser`] and [`UserChanges`]
//! before calling this port, so implementations only deal with storage
//! outcomes.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, UserChanges, UserId};

/// Domain use-case port for creating, updating and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user and return its new identifier.
    async fn create_user(&self, user: NewUser) -> Result<UserId, Error>;

    /// Apply a partial update.
    ///
    /// Fails with [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound)
    /// when the user does not exist, including when `changes` is empty.
    async fn update_user(&self, id: &UserId, changes: UserChanges) -> Result<(), Error>;

    /// Delete a user, failing with `NotFound` when it does not exist.
    async fn delete_user(&self, id: &UserId) -> Result<(), Error>;
}

//! Internal Diesel row structs for the `users` table.
//!
//! These never leave the persistence module; the repository converts them to
//! and from domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub role: String,
    #[expect(dead_code, reason = "selected for ordering; not surfaced to the domain")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new users. `role` and `created_at` use column
/// defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password: &'a str,
    pub name: Option<&'a str>,
}

/// Partial update. `None` fields are left out of the `SET` clause.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
    pub name: Option<&'a str>,
}

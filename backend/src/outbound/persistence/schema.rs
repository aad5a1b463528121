//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// User accounts.
    users (id) {
        /// Primary key, generated by the application.
        id -> Uuid,
        /// Contact email address.
        email -> Varchar,
        /// Stored password.
        password -> Varchar,
        /// Optional display name.
        name -> Nullable<Varchar>,
        /// `USER` or `ADMIN`; defaults to `USER`.
        role -> Varchar,
        /// Insertion timestamp, used for list ordering.
        created_at -> Timestamptz,
    }
}

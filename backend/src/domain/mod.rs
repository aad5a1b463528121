//! Domain primitives, ports and services.
//!
//! Purpose: define the user account model and the use cases the HTTP layer
//! drives. Nothing here depends on actix, diesel or utoipa; adapters live in
//! `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: per-request correlation identifier held in task-local storage.
//! - User and its field newtypes (UserId, EmailAddress, Password, Role).
//! - NewUser / UserChanges: validated create and partial-update inputs.
//! - UserService: implementation of the `ports::UsersCommand` and
//!   `ports::UsersQuery` driving ports.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, NewUser, PASSWORD_MIN, Password, Role, User, UserChanges, UserId,
    UserValidationError,
};
pub use self::user_service::UserService;

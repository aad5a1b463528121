//! User CRUD handlers.
//!
//! ```text
//! POST   /users       {"email":"a@b.com","password":"12345678","name":"Ada"}
//! GET    /users
//! PATCH  /users/{id}  {"name":"Countess"}
//! DELETE /users/{id}
//! ```
//!
//! Request bodies are deserialised with every field optional so a missing
//! field reports `missing_field` against its name instead of a generic serde
//! message. A field sent as `null` is rejected rather than treated as absent.
//! Unknown fields are ignored.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, NewUser, Role, User, UserChanges};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, RoleSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    EMAIL, NAME, PASSWORD, keep_null, optional, parse_email, parse_password, parse_user_id,
    require,
};

/// Request body for `POST /users`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Contact email address.
    #[serde(default, deserialize_with = "keep_null")]
    #[schema(required = true, value_type = String, example = "ada@example.com")]
    pub email: Option<Option<String>>,
    /// At least eight characters.
    #[serde(default, deserialize_with = "keep_null")]
    #[schema(required = true, value_type = String, min_length = 8, example = "analytical")]
    pub password: Option<Option<String>>,
    /// Optional display name.
    #[serde(default, deserialize_with = "keep_null")]
    #[schema(required = false, value_type = String, example = "Ada Lovelace")]
    pub name: Option<Option<String>>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = Error;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        let email = parse_email(require(value.email, EMAIL)?)?;
        let password = parse_password(require(value.password, PASSWORD)?)?;
        Ok(Self {
            email,
            password,
            name: optional(value.name, NAME)?,
        })
    }
}

/// Request body for `PATCH /users/{id}`. Absent fields stay unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    /// Replacement email address.
    #[serde(default, deserialize_with = "keep_null")]
    #[schema(required = false, value_type = String, example = "countess@example.com")]
    pub email: Option<Option<String>>,
    /// Replacement password, at least eight characters.
    #[serde(default, deserialize_with = "keep_null")]
    #[schema(required = false, value_type = String, min_length = 8)]
    pub password: Option<Option<String>>,
    /// Replacement display name.
    #[serde(default, deserialize_with = "keep_null")]
    #[schema(required = false, value_type = String, example = "Countess of Lovelace")]
    pub name: Option<Option<String>>,
}

impl TryFrom<UpdateUserRequest> for UserChanges {
    type Error = Error;

    fn try_from(value: UpdateUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            email: optional(value.email, EMAIL)?
                .map(parse_email)
                .transpose()?,
            password: optional(value.password, PASSWORD)?
                .map(parse_password)
                .transpose()?,
            name: optional(value.name, NAME)?,
        })
    }
}

/// Confirmation body returned by the mutating endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome.
    #[schema(example = "User created")]
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

/// A stored user as returned by `GET /users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    /// Stable identifier.
    #[schema(value_type = String, format = Uuid, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Display name, `null` when unset.
    pub name: Option<String>,
    /// Contact email address.
    pub email: String,
    /// Stored password.
    pub password: String,
    /// Authorisation role.
    #[schema(value_type = RoleSchema)]
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().map(str::to_owned),
            email: user.email().to_string(),
            password: user.password().expose().to_owned(),
            role: user.role(),
        }
    }
}

/// Body of `GET /users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UsersResponse {
    /// Every stored user, oldest first.
    pub users: Vec<UserResponse>,
}

/// Create a user.
///
/// The new identifier is returned in the `Location` header only.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = MessageResponse,
            headers(("Location" = String, description = "Path of the new user"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tag = "user",
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let new_user = NewUser::try_from(payload.into_inner())?;
    let id = state.users.create_user(new_user).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/users/{id}")))
        .json(MessageResponse::new("User created")))
}

/// List every user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_service::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = UsersResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tag = "user",
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UsersResponse>> {
    let users = state.users_query.list_users().await?;
    debug!(count = users.len(), "returning users");
    Ok(web::Json(UsersResponse {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// Partially update a user.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(("id" = uuid::Uuid, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tag = "user",
    operation_id = "updateUser"
)]
#[patch("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let changes = UserChanges::try_from(payload.into_inner())?;
    state.users.update_user(&id, changes).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("User updated")))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = uuid::Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tag = "user",
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    state.users.delete_user(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted")))
}

#[cfg(test)]
mod tests;

//! Request validation helpers for the HTTP adapter.
//!
//! Every failure becomes an `invalid_request` [`Error`] whose `details`
//! name the offending field and a machine-readable code.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde::{Deserialize, Deserializer};
use serde_json::json;
use tracing::debug;

use crate::domain::{EmailAddress, Error, Password, UserId, UserValidationError};

/// Detail codes attached to validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidEmail,
    PasswordTooShort,
    InvalidUuid,
    InvalidBody,
}

impl ValidationCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidEmail => "invalid_email",
            Self::PasswordTooShort => "password_too_short",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidBody => "invalid_body",
        }
    }
}

/// Newtype wrapper for request field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");
pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const USER_ID: FieldName = FieldName::new("id");
const BODY: FieldName = FieldName::new("body");

fn field_error(field: FieldName, code: ValidationCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ValidationCode::MissingField,
        format!("missing required field: {name}"),
    )
}

fn null_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ValidationCode::InvalidBody,
        format!("{name} must not be null"),
    )
}

/// `deserialize_with` hook for body fields: an absent field stays `None`
/// while an explicit `null` becomes `Some(None)`.
///
/// Pair it with `#[serde(default)]` so absence falls through to `None`.
pub(crate) fn keep_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Map a domain constructor failure to a field-level HTTP error.
pub(crate) fn user_field_error(field: FieldName, err: &UserValidationError) -> Error {
    let code = match err {
        UserValidationError::InvalidEmail => ValidationCode::InvalidEmail,
        UserValidationError::PasswordTooShort { .. } => ValidationCode::PasswordTooShort,
        UserValidationError::EmptyId | UserValidationError::InvalidId => ValidationCode::InvalidUuid,
        UserValidationError::UnknownRole(_) => ValidationCode::InvalidBody,
    };
    field_error(field, code, err.to_string())
}

/// Unwrap an optional body field. An explicit `null` is a type error.
pub(crate) fn optional<T>(value: Option<Option<T>>, field: FieldName) -> Result<Option<T>, Error> {
    match value {
        Some(None) => Err(null_field_error(field)),
        Some(Some(inner)) => Ok(Some(inner)),
        None => Ok(None),
    }
}

/// Unwrap a required body field or fail with `missing_field`.
pub(crate) fn require<T>(value: Option<Option<T>>, field: FieldName) -> Result<T, Error> {
    optional(value, field)?.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_email(raw: String) -> Result<EmailAddress, Error> {
    EmailAddress::new(raw).map_err(|err| user_field_error(EMAIL, &err))
}

pub(crate) fn parse_password(raw: String) -> Result<Password, Error> {
    Password::new(raw).map_err(|err| user_field_error(PASSWORD, &err))
}

/// Parse the `{id}` path segment.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| user_field_error(USER_ID, &err))
}

fn invalid_body_error(err: &JsonPayloadError) -> Error {
    debug!(error = %err, "rejected request body");
    let message = match err {
        JsonPayloadError::ContentType => "request body must be JSON".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("invalid request body: {inner}"),
        other => format!("invalid request body: {other}"),
    };
    field_error(BODY, ValidationCode::InvalidBody, message)
}

/// JSON extractor configuration routing payload failures through the
/// domain error envelope instead of actix's plain-text 400.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_service::inbound::http::validation::json_config;
///
/// let _app = App::new().app_data(json_config());
/// ```
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req: &HttpRequest| invalid_body_error(&err).into())
}

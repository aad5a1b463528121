//! Handler tests backed by mocked driving ports.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockUsersCommand, MockUsersQuery};
use crate::domain::{EmailAddress, Password, UserId};
use crate::inbound::http::validation::json_config;

const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn user_id() -> UserId {
    UserId::new(USER_ID).expect("fixture id")
}

async fn call(
    command: MockUsersCommand,
    query: MockUsersQuery,
    request: actix_test::TestRequest,
) -> (StatusCode, Option<String>, Value) {
    let state = HttpState::new(Arc::new(command), Arc::new(query));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .service(create_user)
            .service(list_users)
            .service(update_user)
            .service(delete_user),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, location, value)
}

fn detail(body: &Value, key: &str) -> Option<String> {
    body.get("details")?.get(key)?.as_str().map(str::to_owned)
}

#[rstest]
#[actix_web::test]
async fn create_returns_message_and_location(user_id: UserId) {
    let mut command = MockUsersCommand::new();
    command
        .expect_create_user()
        .withf(|user| user.email.as_ref() == "a@b.com" && user.name.is_none())
        .times(1)
        .return_once(move |_| Ok(user_id));

    let (status, location, body) = call(
        command,
        MockUsersQuery::new(),
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(json!({"email": "a@b.com", "password": "12345678"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(location.as_deref(), Some(format!("/users/{USER_ID}").as_str()));
    assert_eq!(body, json!({"message": "User created"}));
}

#[rstest]
#[case(json!({"password": "12345678"}), "email", "missing_field")]
#[case(json!({"email": "a@b.com"}), "password", "missing_field")]
#[case(json!({"email": "not-an-email", "password": "12345678"}), "email", "invalid_email")]
#[case(json!({"email": "a@b.com", "password": "1234567"}), "password", "password_too_short")]
#[case(json!({"email": 5, "password": "12345678"}), "body", "invalid_body")]
#[actix_web::test]
async fn create_rejects_invalid_bodies_without_calling_the_service(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut command = MockUsersCommand::new();
    command.expect_create_user().times(0);

    let (status, _, body) = call(
        command,
        MockUsersQuery::new(),
        actix_test::TestRequest::post().uri("/users").set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(detail(&body, "field").as_deref(), Some(field));
    assert_eq!(detail(&body, "code").as_deref(), Some(code));
}

#[rstest]
#[actix_web::test]
async fn create_rejects_non_json_payloads() {
    let mut command = MockUsersCommand::new();
    command.expect_create_user().times(0);

    let (status, _, body) = call(
        command,
        MockUsersQuery::new(),
        actix_test::TestRequest::post()
            .uri("/users")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail(&body, "code").as_deref(), Some("invalid_body"));
}

#[rstest]
#[actix_web::test]
async fn list_serialises_absent_names_as_null(user_id: UserId) {
    let user = User::new(
        user_id,
        EmailAddress::new("a@b.com").expect("email"),
        Password::new("12345678").expect("password"),
        None,
        Role::User,
    );
    let mut query = MockUsersQuery::new();
    query
        .expect_list_users()
        .times(1)
        .return_once(move || Ok(vec![user]));

    let (status, _, body) = call(
        MockUsersCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/users"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"users": [{
            "id": USER_ID,
            "name": null,
            "email": "a@b.com",
            "password": "12345678",
            "role": "USER",
        }]})
    );
}

#[rstest]
#[actix_web::test]
async fn list_surfaces_unavailable_database() {
    let mut query = MockUsersQuery::new();
    query
        .expect_list_users()
        .return_once(|| Err(Error::service_unavailable("user repository unavailable")));

    let (status, _, body) = call(
        MockUsersCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/users"),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "service_unavailable");
}

#[rstest]
#[actix_web::test]
async fn update_passes_only_supplied_fields(user_id: UserId) {
    let mut command = MockUsersCommand::new();
    command
        .expect_update_user()
        .withf(move |id, changes| {
            *id == user_id
                && changes.name.as_deref() == Some("X")
                && changes.email.is_none()
                && changes.password.is_none()
        })
        .times(1)
        .return_once(|_, _| Ok(()));

    let (status, _, body) = call(
        command,
        MockUsersQuery::new(),
        actix_test::TestRequest::patch()
            .uri(&format!("/users/{USER_ID}"))
            .set_json(json!({"name": "X"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "User updated"}));
}

#[rstest]
#[actix_web::test]
async fn update_maps_not_found() {
    let mut command = MockUsersCommand::new();
    command
        .expect_update_user()
        .return_once(|id, _| Err(Error::not_found(format!("user {id} not found"))));

    let (status, _, body) = call(
        command,
        MockUsersQuery::new(),
        actix_test::TestRequest::patch()
            .uri(&format!("/users/{USER_ID}"))
            .set_json(json!({"name": "X"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn update_validates_present_fields() {
    let mut command = MockUsersCommand::new();
    command.expect_update_user().times(0);

    let (status, _, body) = call(
        command,
        MockUsersQuery::new(),
        actix_test::TestRequest::patch()
            .uri(&format!("/users/{USER_ID}"))
            .set_json(json!({"password": "short"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail(&body, "code").as_deref(), Some("password_too_short"));
}

#[rstest]
#[case::patch(actix_test::TestRequest::patch().set_json(json!({"name": "X"})))]
#[case::delete(actix_test::TestRequest::delete())]
#[actix_web::test]
async fn non_uuid_path_ids_are_rejected(#[case] request: actix_test::TestRequest) {
    let mut command = MockUsersCommand::new();
    command.expect_update_user().times(0);
    command.expect_delete_user().times(0);

    let (status, _, body) = call(command, MockUsersQuery::new(), request.uri("/users/42")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail(&body, "field").as_deref(), Some("id"));
    assert_eq!(detail(&body, "code").as_deref(), Some("invalid_uuid"));
}

#[rstest]
#[actix_web::test]
async fn delete_returns_message(user_id: UserId) {
    let mut command = MockUsersCommand::new();
    command
        .expect_delete_user()
        .withf(move |id| *id == user_id)
        .times(1)
        .return_once(|_| Ok(()));

    let (status, _, body) = call(
        command,
        MockUsersQuery::new(),
        actix_test::TestRequest::delete().uri(&format!("/users/{USER_ID}")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "User deleted"}));
}

#[rstest]
#[actix_web::test]
async fn internal_failures_are_redacted() {
    let mut command = MockUsersCommand::new();
    command
        .expect_delete_user()
        .return_once(|_| Err(Error::internal("user repository error: relation missing")));

    let (status, _, body) = call(
        command,
        MockUsersQuery::new(),
        actix_test::TestRequest::delete().uri(&format!("/users/{USER_ID}")),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
}

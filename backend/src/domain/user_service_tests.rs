//! Tests for the user domain service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{EmailAddress, ErrorCode, Password, Role};

const USER_ID: &str = "11111111-1111-1111-1111-111111111111";

#[fixture]
fn user_id() -> UserId {
    UserId::new(USER_ID).expect("fixture user id")
}

#[fixture]
fn new_user() -> NewUser {
    NewUser {
        email: EmailAddress::new("grace@example.com").expect("fixture email"),
        password: Password::new("compilers").expect("fixture password"),
        name: None,
    }
}

fn service(repo: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(repo))
}

#[rstest]
#[tokio::test]
async fn create_user_returns_repository_id(user_id: UserId, new_user: NewUser) {
    let mut repo = MockUserRepository::new();
    let expected = new_user.clone();
    repo.expect_insert()
        .withf(move |user| *user == expected)
        .times(1)
        .return_once(move |_| Ok(user_id));

    let id = service(repo)
        .create_user(new_user)
        .await
        .expect("create succeeds");

    assert_eq!(id, user_id);
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax error"), ErrorCode::InternalError)]
#[tokio::test]
async fn create_user_maps_repository_errors(
    new_user: NewUser,
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_insert().return_once(move |_| Err(failure));

    let error = service(repo)
        .create_user(new_user)
        .await
        .expect_err("repository failure surfaces");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn list_users_returns_repository_order(user_id: UserId) {
    let first = User::new(
        user_id,
        EmailAddress::new("first@example.com").expect("email"),
        Password::new("password1").expect("password"),
        Some("First".to_owned()),
        Role::User,
    );
    let second = User::new(
        UserId::random(),
        EmailAddress::new("second@example.com").expect("email"),
        Password::new("password2").expect("password"),
        None,
        Role::Admin,
    );
    let stored = vec![first.clone(), second.clone()];

    let mut repo = MockUserRepository::new();
    repo.expect_list().times(1).return_once(move || Ok(stored));

    let users = service(repo).list_users().await.expect("list succeeds");

    assert_eq!(users, vec![first, second]);
}

#[rstest]
#[tokio::test]
async fn list_users_maps_connection_error() {
    let mut repo = MockUserRepository::new();
    repo.expect_list()
        .return_once(|| Err(UserPersistenceError::connection("pool timed out")));

    let error = service(repo).list_users().await.expect_err("list fails");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn update_user_succeeds_when_row_matches(user_id: UserId) {
    let changes = UserChanges {
        name: Some("Renamed".to_owned()),
        ..UserChanges::default()
    };
    let expected = changes.clone();

    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .with(eq(user_id), eq(expected))
        .times(1)
        .return_once(|_, _| Ok(true));

    service(repo)
        .update_user(&user_id, changes)
        .await
        .expect("update succeeds");
}

#[rstest]
#[tokio::test]
async fn update_user_reports_missing_user(user_id: UserId) {
    let mut repo = MockUserRepository::new();
    repo.expect_update().return_once(|_, _| Ok(false));

    let error = service(repo)
        .update_user(&user_id, UserChanges::default())
        .await
        .expect_err("missing user");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert!(error.message().contains(USER_ID));
}

#[rstest]
#[tokio::test]
async fn empty_update_still_checks_existence(user_id: UserId) {
    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .withf(|_, changes| changes.is_empty())
        .times(1)
        .return_once(|_, _| Ok(true));

    service(repo)
        .update_user(&user_id, UserChanges::default())
        .await
        .expect("existing user accepts empty update");
}

#[rstest]
#[tokio::test]
async fn delete_user_succeeds_when_row_matches(user_id: UserId) {
    let mut repo = MockUserRepository::new();
    repo.expect_delete()
        .with(eq(user_id))
        .times(1)
        .return_once(|_| Ok(true));

    service(repo)
        .delete_user(&user_id)
        .await
        .expect("delete succeeds");
}

#[rstest]
#[tokio::test]
async fn delete_user_reports_missing_user(user_id: UserId) {
    let mut repo = MockUserRepository::new();
    repo.expect_delete().return_once(|_| Ok(false));

    let error = service(repo)
        .delete_user(&user_id)
        .await
        .expect_err("missing user");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_user_maps_query_error(user_id: UserId) {
    let mut repo = MockUserRepository::new();
    repo.expect_delete()
        .return_once(|_| Err(UserPersistenceError::query("constraint violated")));

    let error = service(repo)
        .delete_user(&user_id)
        .await
        .expect_err("delete fails");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

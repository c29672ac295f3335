//! Authentication service tests over mock repositories.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use attendly::config::Config;
use attendly::domain::{Password, Role};
use attendly::errors::AppError;
use attendly::infra::repositories::MockUserRepository;
use attendly::services::{AuthService, Authenticator};

use common::{test_user, TestUnitOfWork};

fn service(users: MockUserRepository) -> Authenticator<TestUnitOfWork> {
    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..Default::default()
    };
    Authenticator::new(Arc::new(uow), Config::for_tests())
}

#[tokio::test]
async fn first_registered_user_becomes_admin() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email_with_deleted().returning(|_| Ok(None));
    users.expect_find_by_username_with_deleted().returning(|_| Ok(None));
    users.expect_count().returning(|| Ok(0));
    users.expect_create().returning(|username, email, hash, full_name, role| {
        let mut user = test_user(Uuid::new_v4(), role);
        user.username = username;
        user.email = email;
        user.password_hash = hash;
        user.full_name = full_name;
        Ok(user)
    });

    let user = service(users)
        .register(
            "admin".to_string(),
            "admin@example.com".to_string(),
            "password123".to_string(),
            "First Admin".to_string(),
        )
        .await
        .unwrap();

    assert_eq!(user.role, Role::Admin);
}

#[tokio::test]
async fn later_registrations_default_to_employee() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email_with_deleted().returning(|_| Ok(None));
    users.expect_find_by_username_with_deleted().returning(|_| Ok(None));
    users.expect_count().returning(|| Ok(5));
    users.expect_create().returning(|username, email, hash, full_name, role| {
        let mut user = test_user(Uuid::new_v4(), role);
        user.username = username;
        user.email = email;
        user.password_hash = hash;
        user.full_name = full_name;
        Ok(user)
    });

    let user = service(users)
        .register(
            "newhire".to_string(),
            "newhire@example.com".to_string(),
            "password123".to_string(),
            "New Hire".to_string(),
        )
        .await
        .unwrap();

    assert_eq!(user.role, Role::Employee);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email_with_deleted()
        .returning(|_| Ok(Some(test_user(Uuid::new_v4(), Role::Employee))));

    let result = service(users)
        .register(
            "jdoe".to_string(),
            "jdoe@example.com".to_string(),
            "password123".to_string(),
            "Jordan Doe".to_string(),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn login_round_trips_a_verifiable_token() {
    let password_hash = Password::new("password123").unwrap().into_string();

    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(move |_| {
        let mut user = test_user(Uuid::new_v4(), Role::Manager);
        user.password_hash = password_hash.clone();
        Ok(Some(user))
    });

    let auth = service(users);
    let token = auth
        .login("jdoe@example.com".to_string(), "password123".to_string())
        .await
        .unwrap();

    assert_eq!(token.token_type, "Bearer");

    let claims = auth.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.role, "MANAGER");
    assert_eq!(claims.username, "jdoe");
}

#[tokio::test]
async fn login_with_wrong_password_fails() {
    let password_hash = Password::new("password123").unwrap().into_string();

    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(move |_| {
        let mut user = test_user(Uuid::new_v4(), Role::Employee);
        user.password_hash = password_hash.clone();
        Ok(Some(user))
    });

    let result = service(users)
        .login("jdoe@example.com".to_string(), "wrong-password".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn login_with_unknown_email_fails_the_same_way() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(|_| Ok(None));

    let result = service(users)
        .login("nobody@example.com".to_string(), "password123".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn deactivated_account_cannot_login() {
    let password_hash = Password::new("password123").unwrap().into_string();

    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(move |_| {
        let mut user = test_user(Uuid::new_v4(), Role::Employee);
        user.password_hash = password_hash.clone();
        user.active = false;
        Ok(Some(user))
    });

    let result = service(users)
        .login("jdoe@example.com".to_string(), "password123".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn change_password_verifies_the_current_one() {
    let user_id = Uuid::new_v4();
    let password_hash = Password::new("password123").unwrap().into_string();

    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(move |id| {
        let mut user = test_user(id, Role::Employee);
        user.password_hash = password_hash.clone();
        Ok(Some(user))
    });

    let result = service(users)
        .change_password(
            user_id,
            "not-the-password".to_string(),
            "new-password-456".to_string(),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let auth = service(MockUserRepository::new());
    assert!(auth.verify_token("not-a-jwt").is_err());
}

/// Authentication service tests
/// Tests password storage, login tokens and refresh against a real club database
mod common;

use axum::http::StatusCode;
use club_core::{storage::StorageContext, Role, UserId};
use club_server::services::auth::AuthService;
use common::{fixtures, TestApp};
use serde_json::json;

fn create_test_auth_service() -> AuthService {
    AuthService::new(fixtures::JWT_SECRET.to_string(), 1, 7).with_cost(4)
}

/// Password hashing produces salted bcrypt hashes
#[test]
fn test_password_hashing() {
    let auth_service = create_test_auth_service();

    let hash = auth_service.hash_password(fixtures::TEST_PASSWORD).unwrap();
    assert!(hash.starts_with("$2b$") || hash.starts_with("$2a$"));

    let hash2 = auth_service.hash_password(fixtures::TEST_PASSWORD).unwrap();
    assert_ne!(hash, hash2, "Hashes should differ due to random salt");

    assert!(auth_service
        .verify_password(fixtures::TEST_PASSWORD, &hash)
        .unwrap());
    assert!(!auth_service.verify_password("wrong", &hash).unwrap());
}

#[test]
fn test_password_verification_invalid_hash() {
    let auth_service = create_test_auth_service();

    let result = auth_service.verify_password("password", "not-a-valid-hash");
    assert!(result.is_err(), "Invalid hash should return error");
}

#[test]
fn test_token_signed_with_other_secret_rejected() {
    let auth_service = create_test_auth_service();
    let other = AuthService::new("another-club".to_string(), 1, 7);

    let token = other
        .create_access_token(&UserId::generate(), Role::Admin)
        .unwrap();
    assert!(auth_service.verify_access_token(&token).is_err());
    assert!(auth_service.verify_token("garbage.token.value").is_err());
}

/// Hashes stored through the storage layer verify against the original password
#[tokio::test]
async fn test_stored_hash_verifies() {
    let app = TestApp::new().await;
    let (user, _) = app.member("listener").await;

    let hash = app
        .db
        .get_password_hash(&user.id)
        .await
        .unwrap()
        .expect("hash should be stored");

    assert!(app
        .auth_service
        .verify_password(fixtures::TEST_PASSWORD, &hash)
        .unwrap());
}

/// The refreshed access token takes its role from the stored account
#[tokio::test]
async fn test_refresh_reads_role_from_account() {
    let app = TestApp::new().await;
    let (curator, _) = app.admin("curator").await;
    let (listener, _) = app.member("listener").await;

    for (user, expected) in [(&curator, Role::Admin), (&listener, Role::User)] {
        let refresh_token = app.auth_service.create_refresh_token(&user.id).unwrap();

        let (status, body) = app
            .post(
                "/api/auth/refresh",
                None,
                json!({ "refresh_token": refresh_token }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");

        let access = body["access_token"].as_str().unwrap();
        let actor = app.auth_service.verify_access_token(access).unwrap();
        assert_eq!(&actor.user_id, &user.id);
        assert_eq!(actor.role, expected);
    }

    // Member tokens from refresh still cannot reach admin routes
    let refresh_token = app.auth_service.create_refresh_token(&listener.id).unwrap();
    let (_, body) = app
        .post("/api/auth/refresh", None, json!({ "refresh_token": refresh_token }))
        .await;
    let (status, _) = app
        .get("/api/users", body["access_token"].as_str())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

/// A removed account can no longer refresh its session
#[tokio::test]
async fn test_refresh_after_account_removal() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin("curator").await;
    let (listener, _) = app.member("listener").await;
    let refresh_token = app.auth_service.create_refresh_token(&listener.id).unwrap();

    let (status, _) = app
        .delete(&format!("/api/users/{}", listener.id), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post("/api/auth/refresh", None, json!({ "refresh_token": refresh_token }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Account no longer exists");
}

#[tokio::test]
async fn test_access_token_cannot_refresh() {
    let app = TestApp::new().await;
    let (_, access) = app.member("listener").await;

    let (status, _) = app
        .post("/api/auth/refresh", None, json!({ "refresh_token": access }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

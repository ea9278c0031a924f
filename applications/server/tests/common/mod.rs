//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use club_core::{storage::StorageContext, CreateUser, Role, User};
use club_server::{api, services::AuthService, state::AppState};
use club_storage::Database;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Test user credentials
pub mod fixtures {
    pub const TEST_PASSWORD: &str = "listening-party";
    pub const JWT_SECRET: &str = "test-secret-key";
}

/// A router over a fresh SQLite file, with direct handles for setup
pub struct TestApp {
    pub router: Router,
    pub db: Arc<Database>,
    pub auth_service: Arc<AuthService>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("club.db");
        let db = Database::open(&format!("sqlite://{}", db_path.display()))
            .await
            .unwrap();
        let db = Arc::new(db);

        let auth_service = Arc::new(
            AuthService::new(fixtures::JWT_SECRET.to_string(), 1, 1).with_cost(4),
        );

        let app_state = AppState::new(Arc::clone(&db), Arc::clone(&auth_service));
        let router = api::create_router(app_state, &[]);

        Self {
            router,
            db,
            auth_service,
            _temp_dir: temp_dir,
        }
    }

    /// Insert an account directly and return it with an access token
    pub async fn create_user(&self, username: &str, role: Role) -> (User, String) {
        let password_hash = self
            .auth_service
            .hash_password(fixtures::TEST_PASSWORD)
            .unwrap();
        let user = self
            .db
            .create_user(CreateUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash,
                role,
            })
            .await
            .unwrap();
        let token = self
            .auth_service
            .create_access_token(&user.id, user.role)
            .unwrap();
        (user, token)
    }

    pub async fn member(&self, username: &str) -> (User, String) {
        self.create_user(username, Role::User).await
    }

    pub async fn admin(&self, username: &str) -> (User, String) {
        self.create_user(username, Role::Admin).await
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, token, None).await
    }

    /// Create a catalog album through the API as `admin_token`
    pub async fn create_album(&self, admin_token: &str, title: &str, artist: &str) -> Value {
        let (status, album) = self
            .post(
                "/api/albums",
                Some(admin_token),
                serde_json::json!({ "title": title, "artist": artist }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{album}");
        album
    }
}

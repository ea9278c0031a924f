/// API route modules
use crate::{error::ServerError, middleware, state::AppState};
use axum::{
    extract::{FromRequest, Request},
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod albums;
pub mod auth;
pub mod health;
pub mod personal_albums;
pub mod posts;
pub mod profiles;
pub mod users;

/// JSON body extractor whose rejections use the `{"error": ...}` envelope
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Build the full application router
///
/// Every route lives under `/api`. The auth middleware runs on all of them;
/// handlers decide through their extractors whether a caller is required.
pub fn create_router(app_state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/health", get(health::health))
        // Accounts
        .route("/users/register", post(auth::register))
        .route("/users/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/users", get(users::list_users))
        .route("/users/:id", axum::routing::delete(users::delete_user))
        .route("/users/:id/activity", get(users::user_activity))
        // Profiles
        .route("/profiles/settings", put(profiles::update_settings))
        .route("/profiles/:id", get(profiles::get_profile))
        // Shared catalog
        .route(
            "/albums",
            get(albums::list_albums).post(albums::create_album),
        )
        .route("/albums/fix-entry-numbers", post(albums::fix_entry_numbers))
        .route(
            "/albums/:id",
            get(albums::get_album)
                .put(albums::update_album)
                .delete(albums::delete_album),
        )
        .route("/albums/:id/score", post(albums::submit_score))
        .route("/albums/:id/clubscore", put(albums::set_club_score))
        .route(
            "/albums/:id/favorite",
            post(albums::favorite_album).delete(albums::unfavorite_album),
        )
        .route(
            "/albums/:id/comments",
            get(albums::list_comments).post(albums::add_comment),
        )
        // Personal collections
        .route(
            "/personal-albums",
            post(personal_albums::create_personal_album),
        )
        .route(
            "/personal-albums/:id",
            get(personal_albums::get_personal_album)
                .put(personal_albums::update_personal_album)
                .delete(personal_albums::delete_personal_album),
        )
        .route(
            "/personal-albums/:id/comments",
            get(personal_albums::list_comments).post(personal_albums::add_comment),
        )
        // Posts
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/:id",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        );

    let auth_layer = axum_middleware::from_fn_with_state(
        Arc::clone(&app_state.auth_service),
        middleware::auth_middleware,
    );

    Router::new()
        .nest("/api", api)
        .layer(auth_layer)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(app_state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

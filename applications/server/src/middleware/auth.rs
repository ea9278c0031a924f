/// Authentication middleware and extractors
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use club_core::{Actor, Role, UserId};
use std::sync::Arc;

/// Verified identity of the caller, stored in request extensions
///
/// Usable as an extractor: handlers that take it reject anonymous requests
/// with 401. Use `Option<AuthenticatedUser>` for routes that are public but
/// personalize their response.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Identity handed to storage operations that check ownership
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id.clone(), self.role)
    }
}

/// An authenticated administrator
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

/// Middleware that validates a bearer token when one is supplied
///
/// Requests without an `Authorization` header pass through anonymously.
/// A header that is present but malformed, expired or forged is rejected
/// with 401 on every route.
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(header) = request.headers().get(axum::http::header::AUTHORIZATION) else {
        return next.run(request).await;
    };

    let token = match header.to_str().ok().and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token.trim(),
        None => {
            return ServerError::Auth("Malformed Authorization header".to_string())
                .into_response()
        }
    };

    match auth_service.verify_access_token(token) {
        Ok(Actor { user_id, role }) => {
            request
                .extensions_mut()
                .insert(AuthenticatedUser { user_id, role });
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!("Token verification failed: {}", e);
            ServerError::Auth("Invalid or expired token".to_string()).into_response()
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ServerError::Auth("Authentication required".to_string()))
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::warn!(user_id = %user.user_id, "Admin route denied");
            return Err(ServerError::Unauthorized(
                "Administrator access required".to_string(),
            ));
        }
        Ok(AdminUser(user))
    }
}

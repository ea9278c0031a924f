/// Member authentication - password hashing and club session tokens
///
/// Access tokens carry the member's id and role so every request can be
/// authorized without a database read. Refresh tokens carry only the id: the
/// role is looked up again when a new access token is issued, so promotions,
/// demotions and account removal take effect at the next refresh.
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use club_core::{Actor, Role, User, UserId};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_lifetime: Duration,
    refresh_token_lifetime: Duration,
    bcrypt_cost: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Member id
    pub sub: String,
    /// Present on access tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub exp: i64,
    pub iat: i64,
    pub token_type: TokenType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Tokens handed out at login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthService {
    pub fn new(secret: String, access_lifetime_hours: u64, refresh_lifetime_days: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_lifetime: Duration::hours(access_lifetime_hours as i64),
            refresh_token_lifetime: Duration::days(refresh_lifetime_days as i64),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Override the bcrypt work factor (tests use the minimum)
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.bcrypt_cost).map_err(ServerError::from)
    }

    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Access and refresh tokens for a member who just logged in
    pub fn issue_tokens(&self, user: &User) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.create_access_token(&user.id, user.role)?,
            refresh_token: self.create_refresh_token(&user.id)?,
        })
    }

    pub fn create_access_token(&self, user_id: &UserId, role: Role) -> Result<String> {
        self.sign(
            user_id,
            Some(role),
            TokenType::Access,
            self.access_token_lifetime,
        )
    }

    pub fn create_refresh_token(&self, user_id: &UserId) -> Result<String> {
        self.sign(user_id, None, TokenType::Refresh, self.refresh_token_lifetime)
    }

    /// Decode a token, checking signature and expiry
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }

    /// Identity carried by an access token
    pub fn verify_access_token(&self, token: &str) -> Result<Actor> {
        let claims = self.verify_token(token)?;
        match (claims.token_type, claims.role) {
            (TokenType::Access, Some(role)) => Ok(Actor::new(UserId::new(claims.sub), role)),
            _ => Err(ServerError::Auth("Not an access token".to_string())),
        }
    }

    /// Member id carried by a refresh token
    pub fn verify_refresh_token(&self, token: &str) -> Result<UserId> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(ServerError::Auth("Not a refresh token".to_string()));
        }
        Ok(UserId::new(claims.sub))
    }

    fn sign(
        &self,
        user_id: &UserId,
        role: Option<Role>,
        token_type: TokenType,
        lifetime: Duration,
    ) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.as_str().to_string(),
            role,
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
            token_type,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(ServerError::from)
    }
}

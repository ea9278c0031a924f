/// User domain types
use super::{AlbumSummary, PersonalAlbum, UserId};
use crate::error::{ClubError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = ClubError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(ClubError::invalid_input(format!("Unknown role: {}", other))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile page customization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSettings {
    pub background_color: String,
    pub text_color: String,
    pub accent_color: String,
    pub background_image_url: Option<String>,
    pub layout_style: String,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            background_color: "#1a202c".to_string(),
            text_color: "#e2e8f0".to_string(),
            accent_color: "#f6ad55".to_string(),
            background_image_url: None,
            layout_style: "default".to_string(),
        }
    }
}

/// Partial profile settings update
///
/// Empty strings keep the previous value; `background_image_url` is replaced
/// whenever it is present so it can be cleared with `""`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileSettings {
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default)]
    pub accent_color: Option<String>,
    #[serde(default)]
    pub background_image_url: Option<String>,
    #[serde(default)]
    pub layout_style: Option<String>,
}

impl UpdateProfileSettings {
    /// Merge onto the current settings
    pub fn apply_to(self, current: &ProfileSettings) -> ProfileSettings {
        fn pick(new: Option<String>, old: &str) -> String {
            new.filter(|value| !value.is_empty())
                .unwrap_or_else(|| old.to_string())
        }

        ProfileSettings {
            background_color: pick(self.background_color, &current.background_color),
            text_color: pick(self.text_color, &current.text_color),
            accent_color: pick(self.accent_color, &current.accent_color),
            background_image_url: match self.background_image_url {
                Some(url) if url.is_empty() => None,
                Some(url) => Some(url),
                None => current.background_image_url.clone(),
            },
            layout_style: pick(self.layout_style, &current.layout_style),
        }
    }
}

/// User account (the password hash never leaves storage)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub profile_settings: ProfileSettings,
    pub date_registered: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// User record visible to other members (no email)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    pub profile_settings: ProfileSettings,
    pub date_registered: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            profile_settings: user.profile_settings,
            date_registered: user.date_registered,
        }
    }
}

/// Data for creating an account
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl CreateUser {
    /// Normalize username and email, rejecting blanks and malformed addresses
    pub fn validate(mut self) -> Result<Self> {
        self.username = self.username.trim().to_string();
        self.email = self.email.trim().to_lowercase();

        if self.username.is_empty() {
            return Err(ClubError::invalid_input("Username is required"));
        }
        if self.email.is_empty() {
            return Err(ClubError::invalid_input("Email is required"));
        }
        if !self.email.contains('@') {
            return Err(ClubError::invalid_input("Email address is invalid"));
        }
        Ok(self)
    }
}

/// The verified identity performing an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Owners may always modify; administrators only when `admin_override`
    pub fn can_modify(&self, owner: &UserId, admin_override: bool) -> bool {
        &self.user_id == owner || (admin_override && self.is_admin())
    }
}

/// A score a user has given, with the album it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub score: f64,
    pub album: AlbumSummary,
}

/// Favorites and ratings of one member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActivity {
    pub favorites: Vec<AlbumSummary>,
    pub ratings: Vec<RatingEntry>,
}

/// Public profile page data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user: PublicUser,
    pub personal_albums: Vec<PersonalAlbum>,
}

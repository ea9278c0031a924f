/// ID types for Listeners Club entities
///
/// Every entity is keyed by an opaque UUID v4 string. Ids coming from request
/// paths go through `parse`, which rejects anything that is not a UUID.
use crate::error::{ClubError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[cfg(feature = "sqlx-support")]
use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    sqlite::{SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef},
    Decode, Encode, Sqlite, Type,
};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an id without validating it (ids read back from storage)
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new random id
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Parse an id supplied by a client
            pub fn parse(id: &str) -> Result<Self> {
                Uuid::parse_str(id)
                    .map(|uuid| Self(uuid.to_string()))
                    .map_err(|_| ClubError::invalid_input(concat!("Invalid ", $label, " ID format")))
            }

            /// Get the inner string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl Type<Sqlite> for $name {
            fn type_info() -> SqliteTypeInfo {
                <String as Type<Sqlite>>::type_info()
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl<'q> Encode<'q, Sqlite> for $name {
            fn encode_by_ref(
                &self,
                args: &mut Vec<SqliteArgumentValue<'q>>,
            ) -> std::result::Result<IsNull, BoxDynError> {
                <String as Encode<Sqlite>>::encode_by_ref(&self.0, args)
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl<'r> Decode<'r, Sqlite> for $name {
            fn decode(value: SqliteValueRef<'r>) -> std::result::Result<Self, BoxDynError> {
                let s = <String as Decode<Sqlite>>::decode(value)?;
                Ok($name(s))
            }
        }
    };
}

entity_id!(
    /// User identifier
    UserId,
    "user"
);

entity_id!(
    /// Shared catalog album identifier
    AlbumId,
    "album"
);

entity_id!(
    /// Album comment identifier
    CommentId,
    "comment"
);

entity_id!(
    /// Personal collection album identifier
    PersonalAlbumId,
    "album"
);

entity_id!(
    /// Personal album comment identifier
    PersonalCommentId,
    "comment"
);

entity_id!(
    /// Deep-dive post identifier
    PostId,
    "post"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let id1 = AlbumId::generate();
        let id2 = AlbumId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn parse_accepts_uuid() {
        let raw = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        let id = UserId::parse(raw).unwrap();
        assert_eq!(id.as_str(), raw);
    }

    #[test]
    fn parse_normalizes_uppercase_uuid() {
        let id = AlbumId::parse("67E55044-10B1-426F-9247-BB680E5FE0C8").unwrap();
        assert_eq!(id.as_str(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn parse_rejects_malformed_id() {
        let err = PostId::parse("not-an-id").unwrap_err();
        assert!(matches!(err, ClubError::InvalidInput(ref msg) if msg == "Invalid post ID format"));
    }

    #[test]
    fn display_matches_inner_string() {
        let id = CommentId::new("comment-456");
        assert_eq!(format!("{}", id), "comment-456");
    }
}

//! Core identifier types used throughout the service
//!
//! Every entity is keyed by a 128-bit UUID. Identifiers arriving from the
//! outside are accepted in simple (32 hex chars) or hyphenated form and are
//! always rendered in the simple lowercase form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// An identifier that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Value '{0}' is not a valid identifier")]
pub struct IdentifierError(pub String);

/// Parse a raw identifier string (simple or hyphenated UUID).
pub fn parse_uuid(raw: &str) -> Result<Uuid, IdentifierError> {
    let trimmed = raw.trim();
    match trimmed.len() {
        32 | 36 => Uuid::try_parse(trimmed).map_err(|_| IdentifierError(raw.to_string())),
        _ => Err(IdentifierError(raw.to_string())),
    }
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, sqlx::Type, utoipa::ToSchema)]
        #[sqlx(transparent)]
        #[schema(value_type = String, example = "0190c2d1b4a77c1e9f3b2a6d8e5f4c3b")]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_uuid(s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.simple())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

entity_id!(
    /// Customer identity; scopes every account and order operation.
    CustomerId
);
entity_id!(AddressId);
entity_id!(OrderId);
entity_id!(OrderLineItemId);
entity_id!(CountryId);
entity_id!(
    /// Server-side session behind a context token.
    SessionId
);

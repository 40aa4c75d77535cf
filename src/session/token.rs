//! Signed context tokens
//!
//! A token is an HS256 JWT naming the server-side session and the customer
//! it belongs to. The signature only proves the token was issued here; the
//! session row decides whether it is still valid.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::account::AccountError;
use crate::config::SessionConfig;
use crate::core_types::{CustomerId, SessionId};

/// JWT claims of a context token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Session id
    pub sub: String,
    /// Customer id
    pub cid: String,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn session_id(&self) -> Option<SessionId> {
        self.sub.parse().ok()
    }

    pub fn customer_id(&self) -> Option<CustomerId> {
        self.cid.parse().ok()
    }
}

pub struct ContextTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl ContextTokenService {
    pub fn new(config: &SessionConfig) -> anyhow::Result<Self> {
        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: config.token_ttl()?,
        })
    }

    pub fn issue(&self, session_id: SessionId, customer_id: CustomerId) -> Result<String, AccountError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AccountError::internal("token expiry out of range"))?;

        let claims = Claims {
            sub: session_id.to_string(),
            cid: customer_id.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(AccountError::internal)
    }

    /// Decode and check signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation).map(|data| data.claims)
    }
}

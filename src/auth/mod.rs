//! Authentication Module
//!
//! Bearer-token verification for the item routes. The router only depends on
//! [`TokenValidator`]; [`Hs256Validator`] checks HS256-signed JWTs against a
//! shared secret.

mod jwt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

pub use jwt::Hs256Validator;

/// Message for a request without credentials.
pub const MISSING_CREDENTIALS: &str = "Authentication credentials were not provided.";
/// Message for a request whose token was rejected.
pub const INVALID_TOKEN: &str = "Given token not valid for any token type";

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject the token was issued to
    pub sub: String,
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Authenticated caller, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    subject: String,
    expires_at: DateTime<Utc>,
}

impl Principal {
    pub fn new(subject: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            subject: subject.into(),
            expires_at,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Verifies a raw bearer token.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str) -> Result<Principal, InventoryError>;
}

//! HS256 JWT validation.

use chrono::DateTime;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::debug;

use crate::auth::{Claims, Principal, TokenValidator, INVALID_TOKEN};
use crate::error::InventoryError;

/// Validates HS256 tokens signed with a shared secret. `exp` is required.
#[derive(Clone)]
pub struct Hs256Validator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256Validator {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl TokenValidator for Hs256Validator {
    fn validate(&self, token: &str) -> Result<Principal, InventoryError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            debug!("Rejected bearer token: {}", e);
            InventoryError::Unauthorized(INVALID_TOKEN.to_string())
        })?;

        let claims = data.claims;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| InventoryError::Unauthorized(INVALID_TOKEN.to_string()))?;

        Ok(Principal::new(claims.sub, expires_at))
    }
}

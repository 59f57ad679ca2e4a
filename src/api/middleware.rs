//! Bearer-token authentication middleware.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::api::AppState;
use crate::auth::{INVALID_TOKEN, MISSING_CREDENTIALS};
use crate::error::{InventoryError, Result};

/// Rejects requests without a valid bearer token and records the
/// authenticated `Principal` in the request extensions.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let token = extract_bearer(req.headers())?;
    let principal = state.validator.validate(token)?;
    debug!(
        subject = principal.subject(),
        expires_at = %principal.expires_at(),
        "Authenticated request"
    );

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str> {
    let header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| InventoryError::Unauthorized(MISSING_CREDENTIALS.to_string()))?;

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| InventoryError::Unauthorized(INVALID_TOKEN.to_string()))?;

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn test_missing_header() {
        match extract_bearer(&HeaderMap::new()) {
            Err(InventoryError::Unauthorized(msg)) => assert_eq!(msg, MISSING_CREDENTIALS),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_scheme_and_empty_token() {
        for value in ["Basic dXNlcjpwYXNz", "Bearer ", "Bearer    "] {
            match extract_bearer(&headers(value)) {
                Err(InventoryError::Unauthorized(msg)) => assert_eq!(msg, INVALID_TOKEN),
                other => panic!("unexpected for {value:?}: {other:?}"),
            }
        }
    }
}

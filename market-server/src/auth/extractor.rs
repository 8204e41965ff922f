//! Principal extractor
//!
//! The identity gateway authenticates the caller and forwards the result
//! as trusted headers; this extractor turns them into a [`Principal`] for
//! handlers to consume.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shared::{AppError, Role};

use crate::auth::Principal;

/// Header carrying the principal id, set by the identity gateway
pub const PRINCIPAL_ID_HEADER: &str = "x-principal-id";
/// Header carrying the principal role, set by the identity gateway
pub const PRINCIPAL_ROLE_HEADER: &str = "x-principal-role";

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Reuse if a middleware already extracted it
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(principal.clone());
        }

        let id = parts
            .headers
            .get(PRINCIPAL_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(AppError::unauthorized)?
            .to_string();

        let role = parts
            .headers
            .get(PRINCIPAL_ROLE_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(AppError::unauthorized)?
            .parse::<Role>()
            .map_err(AppError::invalid_principal)?;

        let principal = Principal::new(id, role);

        // Store in extensions for potential reuse
        parts.extensions.insert(principal.clone());

        Ok(principal)
    }
}

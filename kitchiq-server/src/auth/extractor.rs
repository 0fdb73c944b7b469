//! Auth Extractors
//!
//! Custom extractors for validating JWT tokens:
//!
//! - [`CurrentUser`]: required identity — rejects with 401 when the
//!   credential is missing, expired or invalid
//! - [`Caller`]: optional identity — an invalid or absent credential
//!   silently degrades to a guest built from explicit query parameters

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use crate::auth::{Caller, CurrentUser, GuestIdentity, JwtService};
use crate::core::ServerState;
use crate::security_log;
use shared::AppError;

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_header)
}

/// Required-identity extractor
///
/// Use this extractor in protected handlers to automatically validate JWT
/// and extract the caller.
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let Some(token) = bearer_token(parts) else {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
            return Err(AppError::unauthorized());
        };

        let jwt_service = state.get_jwt_service();
        match jwt_service.validate_token(token) {
            Ok(claims) => {
                let user = CurrentUser::from(claims);

                // Store in extensions for potential reuse
                parts.extensions.insert(user.clone());

                Ok(user)
            }
            Err(e) => {
                security_log!(
                    "WARN",
                    "auth_failed",
                    error = format!("{}", e),
                    uri = format!("{:?}", parts.uri)
                );

                match e {
                    crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                    _ => Err(AppError::invalid_token("Invalid token")),
                }
            }
        }
    }
}

/// Optional-identity extractor
///
/// An invalid or expired credential never raises here: the caller is
/// treated as a guest whose restaurant/table hints come from explicit
/// query parameters only, never from the rejected token.
impl FromRequestParts<ServerState> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(token) = bearer_token(parts) {
            let jwt_service = state.get_jwt_service();
            match jwt_service.validate_token(token) {
                Ok(claims) => {
                    let user = CurrentUser::from(claims);
                    parts.extensions.insert(user.clone());
                    return Ok(Caller::Authenticated(user));
                }
                Err(e) => {
                    security_log!(
                        "INFO",
                        "auth_degraded_to_guest",
                        error = format!("{}", e),
                        uri = format!("{:?}", parts.uri)
                    );
                }
            }
        }

        let hint = Query::<GuestIdentity>::try_from_uri(&parts.uri)
            .map(|Query(hint)| hint)
            .unwrap_or_default();

        Ok(Caller::Guest(normalize_hint(hint)))
    }
}

/// Empty query values count as absent
fn normalize_hint(hint: GuestIdentity) -> GuestIdentity {
    GuestIdentity {
        restaurant_id: hint
            .restaurant_id
            .filter(|id| !id.as_str().trim().is_empty()),
        table_number: hint
            .table_number
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()),
    }
}

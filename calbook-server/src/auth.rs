//! Bearer-token authentication.
//!
//! Every route extracts [`CurrentUser`]; the token is resolved against the
//! seeded user directory. Token issuance is out of scope - an unknown or
//! missing token is simply rejected.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};

use calbook_core::User;

use crate::routes::ErrorResponse;
use crate::state::AppState;

/// The authenticated caller.
pub struct CurrentUser(pub User);

/// Rejection for missing/unknown bearer tokens.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: "authentication required".to_string(),
        });
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AuthRejection)?;

        let user = state
            .directory
            .find_by_token(token)
            .cloned()
            .ok_or(AuthRejection)?;

        Ok(CurrentUser(user))
    }
}

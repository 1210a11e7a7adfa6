use std::sync::Arc;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::COOKIE, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::session::parse_session_cookie;
use crate::server::AppState;
use crate::types::User;

/// The session id carried by the request, if any. Never rejects.
pub struct SessionId(pub Option<String>);

/// Extractor that requires a logged-in user.
pub struct RequireUser {
    pub session_id: String,
    pub user: User,
}

#[derive(Debug)]
pub enum AuthError {
    MissingSession,
    InvalidSession,
    InternalError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingSession => (StatusCode::UNAUTHORIZED, "Authentication required"),
            AuthError::InvalidSession => (StatusCode::UNAUTHORIZED, "Session expired or invalid"),
            AuthError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "error": { "msg": message } }))).into_response()
    }
}

fn session_id_from(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find_map(parse_session_cookie)
        .map(str::to_string)
}

impl<S: Send + Sync> FromRequestParts<S> for SessionId {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionId(session_id_from(parts)))
    }
}

impl FromRequestParts<Arc<AppState>> for RequireUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session_id = session_id_from(parts).ok_or(AuthError::MissingSession)?;

        let user = state
            .store
            .get_session_user(&session_id)
            .map_err(|_| AuthError::InternalError)?
            .ok_or(AuthError::InvalidSession)?;

        Ok(RequireUser { session_id, user })
    }
}

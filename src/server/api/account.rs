use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::auth::{
    CredentialHasher, RequireUser, SessionId, expired_session_cookie, generate_session_id,
    session_cookie,
};
use crate::server::AppState;
use crate::server::response::{ApiError, ApiResponse, StoreOptionExt, StoreResultExt};
use crate::store::Store;
use crate::types::{ThemeSettings, User, UserPreferences};
use crate::validation::{ValidationErrors, validate_login, validate_new_user};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Opens a session for `user_id` and returns its `Set-Cookie` value.
fn start_session(store: &dyn Store, user_id: &str) -> Result<String, ApiError> {
    let session_id = generate_session_id();
    store
        .create_session(&session_id, user_id)
        .api_err("Failed to create session")?;
    Ok(session_cookie(&session_id))
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(input): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.as_ref();
    let new_user = validate_new_user(&input)?;

    let password_hash = CredentialHasher::new()
        .hash(&new_user.password)
        .api_err("Failed to hash password")?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        name: new_user.name,
        email: new_user.email,
        purpose: new_user.purpose,
        organization: new_user.organization,
        prefers_single_project: false,
        theme: ThemeSettings::default(),
        created_at: Some(Utc::now()),
    };

    store
        .create_user(&user, &password_hash)
        .api_err("Email already registered")?;
    let cookie = start_session(store, &user.id)?;

    tracing::info!("registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, cookie)],
        ApiResponse::success(user),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(input): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.as_ref();
    let request = validate_login(&input)?;

    let user = store
        .get_user_by_email(&request.email)
        .api_err("Failed to look up user")?
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;
    let hash = store
        .get_password_hash(&user.id)
        .api_err("Failed to look up user")?
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    if !CredentialHasher::new()
        .verify(&request.password, &hash)
        .api_err("Failed to verify password")?
    {
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let cookie = start_session(store, &user.id)?;

    Ok(([(SET_COOKIE, cookie)], ApiResponse::success(user)))
}

pub async fn logout(
    SessionId(session_id): SessionId,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    if let Some(session_id) = session_id {
        state
            .store
            .delete_session(&session_id)
            .api_err("Failed to end session")?;
    }

    Ok::<_, ApiError>((
        [(SET_COOKIE, expired_session_cookie())],
        ApiResponse::success(Value::Null).with_message("Logged out"),
    ))
}

pub async fn current_user(auth: RequireUser) -> impl IntoResponse {
    ApiResponse::success(auth.user)
}

fn parse_preferences(input: &Value) -> Result<UserPreferences, ValidationErrors> {
    match input.get("prefersSingleProject") {
        Some(Value::Bool(prefers_single_project)) => Ok(UserPreferences {
            prefers_single_project: *prefers_single_project,
        }),
        Some(_) => {
            let mut errors = ValidationErrors::new();
            errors.add("prefersSingleProject", "Expected a boolean");
            Err(errors)
        }
        None => {
            let mut errors = ValidationErrors::new();
            errors.add("prefersSingleProject", crate::validation::MSG_REQUIRED);
            Err(errors)
        }
    }
}

/// Serves both `POST` (onboarding) and `PATCH` (settings).
pub async fn update_preferences(
    auth: RequireUser,
    State(state): State<Arc<AppState>>,
    Json(input): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let preferences = parse_preferences(&input)?;

    let user = state
        .store
        .update_user_preferences(&auth.user.id, preferences)
        .api_err("Failed to update preferences")?
        .or_not_found("User not found")?;

    Ok(ApiResponse::success(user))
}

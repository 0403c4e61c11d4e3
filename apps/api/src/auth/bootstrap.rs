use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tower_sessions::Session;
use warden_core::{AppError, UserIdentity};

use crate::dto::BootstrapRequest;
use crate::error::ApiResult;
use crate::state::AppState;

use super::SESSION_USER_KEY;

/// Signs an existing user into a development session when the shared
/// bootstrap token matches.
pub async fn bootstrap_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BootstrapRequest>,
) -> ApiResult<StatusCode> {
    if payload.token != state.bootstrap_token {
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let user = state
        .user_service
        .find_by_email(payload.email.as_str())
        .await?
        .ok_or_else(|| AppError::Unauthorized("unknown bootstrap user".to_owned()))?;

    let identity = UserIdentity::new(user.user_id.as_i64(), user.name, user.email);

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_USER_KEY, &identity)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    tracing::info!(user_id = identity.user_id(), "bootstrap session started");

    Ok(StatusCode::NO_CONTENT)
}

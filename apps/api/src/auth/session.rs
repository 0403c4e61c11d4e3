use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use tower_sessions::Session;
use warden_core::{AppError, UserIdentity};

use crate::dto::{AuthUserResponse, MeResponse};
use crate::error::ApiResult;
use crate::middleware::AuthContext;

use super::SESSION_USER_KEY;

pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    let user_id = session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .map(|identity| identity.user_id());

    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    if let Some(user_id) = user_id {
        tracing::info!(user_id, "session ended");
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(Extension(auth): Extension<AuthContext>) -> Json<MeResponse> {
    Json(MeResponse {
        user: AuthUserResponse::from(&auth.identity),
        permissions: auth.permissions.to_sorted_vec(),
    })
}

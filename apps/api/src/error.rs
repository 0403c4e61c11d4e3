use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use ts_rs::TS;
use warden_core::AppError;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    message: String,
    /// Per-field messages, present for form validation failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<String, Vec<String>>>,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, errors) = match &self.0 {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, None),
            AppError::InvalidFields(fields) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Some(fields.as_map().clone()))
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, None),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, None),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, None),
            AppError::Internal(message) => {
                tracing::error!(error = %message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        let payload = Json(ErrorResponse {
            message: self.0.to_string(),
            errors,
        });

        (status, payload).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use warden_core::{AppError, FieldErrors};

    use super::ApiError;

    #[test]
    fn maps_error_categories_to_status_codes() {
        let cases = [
            (AppError::Validation("bad".to_owned()), StatusCode::BAD_REQUEST),
            (
                AppError::InvalidFields(FieldErrors::single("name", "required")),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::NotFound("gone".to_owned()), StatusCode::NOT_FOUND),
            (
                AppError::Unauthorized("who".to_owned()),
                StatusCode::UNAUTHORIZED,
            ),
            (AppError::Forbidden("no".to_owned()), StatusCode::FORBIDDEN),
            (
                AppError::Internal("boom".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError(error).into_response().status(), status);
        }
    }
}

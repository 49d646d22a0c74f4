use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub type AppResult<T> = Result<T, AppError>;

/// Error taxonomy for the whole service. Authentication and authorization
/// failures carry their externally pinned messages via the `#[error]` strings;
/// the HTTP status mapping lives in `IntoResponse` so routes never pick codes.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Authorization header is required")]
    MissingAuthHeader,
    #[error("Authorization malformed")]
    MalformedAuth,
    #[error("Token signature is invalid")]
    InvalidSignature,
    #[error("Token has expired")]
    ExpiredToken,
    #[error("Token claims are invalid")]
    InvalidClaims,
    #[error("Permissions not included in token")]
    MissingPermissionsClaim,
    #[error("Permission {0} not found")]
    PermissionDenied(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unprocessable(String),
    #[error("{0}")]
    NotFound(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("database error")]
    Database(#[from] sqlx::Error),
    #[error("internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::Unprocessable(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingAuthHeader
            | AppError::MalformedAuth
            | AppError::InvalidSignature
            | AppError::InvalidClaims
            | AppError::MissingPermissionsClaim
            | AppError::PermissionDenied(_) => StatusCode::UNAUTHORIZED,
            AppError::ExpiredToken => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Configuration(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: u16,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // 5xx details stay in the logs; clients get a generic message.
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        let payload = ErrorResponse {
            success: false,
            error: status.as_u16(),
            message,
        };

        (status, Json(payload)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        Self::Internal(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_map_to_401_except_expiry() {
        assert_eq!(AppError::MissingAuthHeader.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::MalformedAuth.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidSignature.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidClaims.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::MissingPermissionsClaim.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::PermissionDenied("post:actors".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::ExpiredToken.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn denied_permission_is_named_in_the_message() {
        let err = AppError::PermissionDenied("delete:movies".into());
        assert_eq!(err.to_string(), "Permission delete:movies not found");
    }
}

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::IntoResponse,
};
use thiserror::Error;
use transit_common::{caller::CallerError, views::ApiErrorResponse};
use transit_db::storage::StoreError;

use crate::auth::AuthError;

const INTERNAL_MESSAGE: &str = "Something went wrong on our end. Please try again later.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error(transparent)]
    CallerError(#[from] CallerError),

    #[error(transparent)]
    InternalAnyhow(#[from] anyhow::Error),
}

impl ApiError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed(message.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Storage(se) => match se {
                StoreError::NotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::CallerError(ce) => match ce {
                CallerError::MissingToken => StatusCode::FORBIDDEN,
                CallerError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            },
            Self::InternalAnyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::ValidationFailed(rejection.body_text())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => Self::CallerError(CallerError::MissingToken),
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::Expired => {
                Self::CallerError(CallerError::unauthorized(Some("Credentials expired".into())))
            }
            AuthError::Storage(se) => Self::Storage(se),
            AuthError::Other(e) => Self::InternalAnyhow(e),
        }
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(err: ApiError) -> Self {
        ApiErrorResponse {
            code: Some(
                match &err {
                    ApiError::NotFound { .. } => "NotFound",
                    ApiError::InvalidCredentials => "InvalidCredentials",
                    ApiError::ValidationFailed(_) => "ValidationFailed",
                    ApiError::Storage(se) => match se {
                        StoreError::NotFound => "NotFound",
                        _ => "InternalError",
                    },
                    ApiError::CallerError(ce) => match ce {
                        CallerError::MissingToken => "MissingToken",
                        CallerError::Unauthorized { .. } => "Unauthorized",
                    },
                    ApiError::InternalAnyhow(_) => "InternalError",
                }
                .into(),
            ),

            message: match &err {
                ApiError::NotFound { resource } => format!("{resource} not found"),
                ApiError::InvalidCredentials => "Invalid credentials".into(),
                ApiError::ValidationFailed(reason) => reason.clone(),
                ApiError::Storage(se) => match se {
                    StoreError::NotFound => "The requested resource was not found.".into(),
                    _ => INTERNAL_MESSAGE.into(),
                },
                ApiError::CallerError(ce) => match ce {
                    CallerError::MissingToken => "No token provided".into(),
                    CallerError::Unauthorized { .. } => "Unauthorized".into(),
                },
                ApiError::InternalAnyhow(_) => INTERNAL_MESSAGE.into(),
            },

            #[cfg(debug_assertions)]
            details: Some(err.to_string()),

            #[cfg(not(debug_assertions))]
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!("Error returned by handler: {self}");
        } else {
            tracing::debug!(status = %status_code, "Request rejected: {self}");
        }

        (status_code, Json(Into::<ApiErrorResponse>::into(self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(err: ApiError) -> (StatusCode, ApiErrorResponse) {
        (err.status_code(), err.into())
    }

    #[test]
    fn bus_not_found_keeps_legacy_message() {
        let (status, body) = render(ApiError::not_found("Bus"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Bus not found");
        assert_eq!(body.code.as_deref(), Some("NotFound"));
    }

    #[test]
    fn missing_token_is_forbidden() {
        let (status, body) = render(CallerError::MissingToken.into());
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.message, "No token provided");
    }

    #[test]
    fn bad_token_is_unauthorized() {
        let (status, body) = render(CallerError::unauthorized(Some("Credentials expired".into())).into());
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.message, "Unauthorized");
        assert_eq!(body.code.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn invalid_credentials_is_unauthorized() {
        let (status, body) = render(AuthError::InvalidCredentials.into());
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.message, "Invalid credentials");
    }

    #[test]
    fn validation_is_unprocessable() {
        let (status, body) = render(ApiError::validation("currentPassengers must not be negative"));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.message, "currentPassengers must not be negative");
    }

    #[test]
    fn internal_errors_hide_their_cause_in_message() {
        let (status, body) = render(anyhow::anyhow!("disk on fire").into());
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.message.contains("disk on fire"));
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

/// Failures of the level pipeline and its input checks
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelError {
    #[error("invalid range: end {end_ms} must be at least one interval ({step_ms} ms) after start {start_ms}")]
    InvalidRange {
        start_ms: u64,
        end_ms: u64,
        step_ms: u64,
    },
    #[error("no candles returned for the requested range")]
    EmptyDataset,
    #[error("insufficient history: need {required}, have {available}")]
    InsufficientHistory { required: usize, available: usize },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unprocessable: {0}")]
    Unprocessable(String),
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Validation(message)
            | AppError::NotFound(message)
            | AppError::Unprocessable(message)
            | AppError::Upstream(message)
            | AppError::Internal(message) => message,
        };

        let body = Json(ErrorResponse { message });
        (status, body).into_response()
    }
}

impl From<LevelError> for AppError {
    fn from(error: LevelError) -> Self {
        let message = error.to_string();
        match error {
            LevelError::InvalidRange { .. } | LevelError::InvalidParameter(_) => {
                AppError::Validation(message)
            }
            LevelError::EmptyDataset => AppError::NotFound(message),
            LevelError::InsufficientHistory { .. } => AppError::Unprocessable(message),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_errors_map_to_status_codes() {
        let cases = [
            (
                LevelError::InvalidRange {
                    start_ms: 10,
                    end_ms: 5,
                    step_ms: 1,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                LevelError::InvalidParameter("window".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (LevelError::EmptyDataset, StatusCode::NOT_FOUND),
            (
                LevelError::InsufficientHistory {
                    required: 3,
                    available: 1,
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(AppError::from(error).status(), status);
        }
    }

    #[test]
    fn into_response_uses_status() {
        let response = AppError::Upstream("timeout".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn insufficient_history_message_names_counts() {
        let error = LevelError::InsufficientHistory {
            required: 4,
            available: 2,
        };
        assert_eq!(error.to_string(), "insufficient history: need 4, have 2");
    }
}

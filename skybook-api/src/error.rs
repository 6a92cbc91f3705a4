use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use skybook_domain::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Authentication,
    #[error("forbidden")]
    Authorization,
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Authentication => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            AppError::Authorization => (StatusCode::FORBIDDEN, "forbidden".to_string()),
            AppError::Domain(err) => {
                let status = match &err {
                    DomainError::FlightNotFound(_) | DomainError::UserNotFound(_) => {
                        StatusCode::NOT_FOUND
                    }
                    DomainError::SeatsUnavailable(_) | DomainError::Validation(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    DomainError::MobileNumberTaken(_) => StatusCode::CONFLICT,
                    DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                    DomainError::Storage(msg) => {
                        tracing::error!("Internal Server Error: {}", msg);
                        return internal_error_response();
                    }
                };
                (status, err.to_string())
            }
            AppError::Internal(err) => {
                tracing::error!("Internal Server Error: {}", err);
                return internal_error_response();
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

fn internal_error_response() -> Response {
    let body = Json(json!({
        "error": "Internal Server Error",
    }));

    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}

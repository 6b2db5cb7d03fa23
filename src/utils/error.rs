use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

use crate::database::StoreError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No `Authorization` header at all
    #[error("unauthorized access")]
    Unauthorized,

    /// Header present but the token is missing, mis-signed or expired
    #[error("unauthorized access")]
    InvalidToken,

    #[error("forbidden")]
    Forbidden,

    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("{0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(#[from] StoreError),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Envelope used for every error response
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken | AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::InvalidId(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Database(_) | AppError::Token(_) => {
                log::error!("❌ {}", self);
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorBody::new(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_auth_errors_share_message() {
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidToken.status_code(), StatusCode::FORBIDDEN);

        let body = to_bytes(AppError::InvalidToken.error_response().into_body())
            .await
            .unwrap();
        let parsed: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert!(parsed.error);
        assert_eq!(parsed.message, "unauthorized access");
    }

    #[actix_web::test]
    async fn test_database_error_hides_details() {
        let err = AppError::Database(StoreError::MissingInsertedId);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let parsed: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.message, "internal server error");
    }
}

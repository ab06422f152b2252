use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use serde::Serialize;
use tracing::error;

use crate::outcome::StoreError;

/// Everything a handler can fail with.
#[derive(Debug, Display)]
pub enum ApiError {
    /// Rejected before reaching the store (bad body, id mismatch).
    #[display(fmt = "{}", _0)]
    BadRequest(String),
    #[display(fmt = "{}", _0)]
    NotFound(StoreError),
    #[display(fmt = "{}", _0)]
    Conflict(StoreError),
    #[display(fmt = "{}", _0)]
    Validation(StoreError),
    #[display(fmt = "{}", _0)]
    Internal(StoreError),
    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    pub message: &'a str,
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Database(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::BadRequest(message) => ErrorBody {
                error_code: None,
                message,
            },
            ApiError::NotFound(e)
            | ApiError::Conflict(e)
            | ApiError::Validation(e)
            | ApiError::Internal(e) => ErrorBody {
                error_code: e.code,
                message: &e.message,
            },
            ApiError::Database(e) => {
                error!(error = %e, "Database call failed");
                ErrorBody {
                    error_code: None,
                    message: "Something went wrong, Contact with system admin",
                }
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

use poem::http::StatusCode;
use poem::Error as PoemError;
use thiserror::Error;

use crate::frappe::FrappeError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FrappeError> for AppError {
    fn from(err: FrappeError) -> Self {
        match err {
            FrappeError::NotFound(msg) => AppError::NotFound(msg),
            // Rejected by a document hook on the host, e.g. frappe.throw
            FrappeError::ValidationError(msg) => AppError::BadRequest(msg),
            other => AppError::Internal(anyhow::Error::new(other).context("Frappe request failed")),
        }
    }
}

impl From<AppError> for PoemError {
    fn from(err: AppError) -> Self {
        PoemError::from_string(err.to_string(), err.status_code())
    }
}

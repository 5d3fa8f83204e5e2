use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StockError {
    #[error("{0}")]
    Validation(String),

    #[error("Property ID {0} does not exist.")]
    PropertyNotFound(String),

    #[error("Stock {0} not found")]
    NotFound(i32),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type StockResult<T> = Result<T, StockError>;

impl From<sea_orm::DbErr> for StockError {
    fn from(err: sea_orm::DbErr) -> Self {
        StockError::Persistence(err.to_string())
    }
}

/// Map onto the shared failure envelope
impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::Validation(msg) => AppError::Validation(msg),
            err @ StockError::PropertyNotFound(_) => AppError::BadRequest(err.to_string()),
            err @ StockError::NotFound(_) => AppError::NotFound(err.to_string()),
            StockError::Persistence(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for StockError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

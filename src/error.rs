use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Please fill in every required field: {0}")]
    FormIncomplete(String),

    #[error("Invalid form: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Passwords do not match")]
    PasswordMismatch,

    /// A business rule refused the operation (seat count, lifecycle, availability).
    #[error("{0}")]
    Constraint(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not logged in with a suitable account")]
    NotLoggedIn,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl BookingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BookingError::FormIncomplete(_)
            | BookingError::Validation(_)
            | BookingError::InvalidInput(_)
            | BookingError::PasswordMismatch => StatusCode::BAD_REQUEST,
            BookingError::Constraint(_) => StatusCode::CONFLICT,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::NotLoggedIn => StatusCode::UNAUTHORIZED,
            BookingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(err = ?self, "Request failed");
        }
        (status, self.to_string()).into_response()
    }
}

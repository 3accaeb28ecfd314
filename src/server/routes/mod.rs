mod quiz;
mod results;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::quiz::QuizError;

pub use quiz::quiz_router;
pub use results::results_router;

/// Every failure ends up as a plain 500, details only go to the log.
#[derive(Debug)]
pub struct ApiError(QuizError);

pub type ApiResponse<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<QuizError>,
{
    fn from(error: E) -> Self {
        Self(error.into())
    }
}

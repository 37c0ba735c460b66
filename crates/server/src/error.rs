use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::warn;
use unlocked_core::{ErrorKind, UnlockedError};

/// Request failure, rendered as a JSON body carrying the message.
#[derive(Debug)]
pub enum AppError {
    /// Pipeline failure from the library.
    Unlocked(UnlockedError),
    /// Malformed request parameters.
    BadRequest(String),
}

impl AppError {
    /// HTTP status for the failure.
    ///
    /// Timeouts map to 504 and the other fetch failures to 502; invalid
    /// input is 400 and a page without the article container is 422.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unlocked(err) => match err.kind() {
                ErrorKind::InvalidUrl => StatusCode::BAD_REQUEST,
                ErrorKind::ContentNotFound => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::FetchFailure if matches!(err, UnlockedError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
                ErrorKind::FetchFailure => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::Unlocked(err) => err.to_string(),
            AppError::BadRequest(message) => message.clone(),
        }
    }
}

impl From<UnlockedError> for AppError {
    fn from(err: UnlockedError) -> Self {
        AppError::Unlocked(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        warn!(status = status.as_u16(), error = %message, "request failed");

        (status, Json(json!({ "error": message }))).into_response()
    }
}

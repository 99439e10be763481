use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

/// Input rejected by the streak calculators or the habit model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreakError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("target per week must be between 1 and 7, got {0}")]
    InvalidTarget(u32),

    #[error("title must be 1 to 100 characters, got {0:?}")]
    InvalidTitle(String),

    #[error("weekly habits require target_per_week")]
    MissingTarget,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<StreakError> for AppError {
    fn from(err: StreakError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

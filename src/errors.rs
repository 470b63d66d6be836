use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("failed to fetch data: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("data endpoint returned {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("missing element: {0}")]
    MissingElement(String),
    #[error("invalid configuration: {0}")]
    Config(String),
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

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::MissingElement(_) => Self::not_found(err.to_string()),
            other => Self::internal(other),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

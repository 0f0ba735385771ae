//! Request-level errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::session::AccessError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("chat not found")]
    UnknownChat,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

impl AppError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Access(AccessError::NotFound(_)) | Self::UnknownChat => StatusCode::NOT_FOUND,
            Self::Access(AccessError::ReadOnly(_)) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            return (status, "Internal server error").into_response();
        }
        tracing::debug!(status = %status, error = %self, "Request rejected");
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ChatId;

    #[test]
    fn test_status_mapping() {
        let id = ChatId::new();
        assert_eq!(
            AppError::from(AccessError::NotFound(id)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(AccessError::ReadOnly(id)).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::UnknownChat.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::BadRequest("empty".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}

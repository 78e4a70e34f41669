use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::metrics::engine::PreconditionError;

/// Errors surfaced by the HTTP layer. Every variant renders as
/// `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized.")]
    Unauthorized,

    #[error("User not found.")]
    UnknownSession,

    #[error("Diet not found.")]
    MealNotFound,

    #[error("{0}")]
    Validation(String),

    #[error("ledger ordering violated: {0}")]
    Precondition(#[from] PreconditionError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::UnknownSession | ApiError::MealNotFound | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Precondition(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Precondition(e) => {
                error!(error = %e, "metrics precondition violated");
                "Internal server error.".to_string()
            }
            ApiError::Internal(e) => {
                error!(error = ?e, "internal error");
                "Internal server error.".to_string()
            }
            other => other.to_string(),
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected json body");
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected path");
        ApiError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::UnknownSession.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MealNotFound.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn internal_details_are_not_leaked() {
        let hidden = serde_json::json!({ "error": "Internal server error." });

        let (status, body) = body_of(ApiError::Internal(anyhow::anyhow!("password=hunter2"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, hidden);

        let (status, body) =
            body_of(ApiError::Precondition(PreconditionError::Unordered { position: 1 })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, hidden);
    }

    #[tokio::test]
    async fn client_errors_carry_their_message() {
        let (status, body) = body_of(ApiError::MealNotFound).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Diet not found." }));

        let (status, body) = body_of(ApiError::UnknownSession).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "User not found." }));
    }
}

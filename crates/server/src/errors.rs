use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{debug, error};

/// Error body: `{"error": <title>, "detail": <message|null>}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub detail: Option<String>,
}

/// Service failure rendered as JSON with the matching status code.
#[derive(Debug)]
pub struct JsonApiError(pub ServiceError);

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self { Self(e) }
}

/// Unreadable or mistyped request bodies are validation failures; the decoder's own
/// wording is logged, not returned.
impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(reason = %rejection.body_text(), "request body rejected");
        let msg = match rejection {
            JsonRejection::JsonDataError(_) => "Request body has a missing or invalid field",
            JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON",
            JsonRejection::MissingJsonContentType(_) => "Expected request with `Content-Type: application/json`",
            _ => "Request body could not be read",
        };
        Self(ServiceError::Validation(msg.into()))
    }
}

impl JsonApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::Validation(_)
            | ServiceError::Conflict(_)
            | ServiceError::AlreadyExists(_)
            | ServiceError::NotLiked(_) => StatusCode::BAD_REQUEST,
            // ownership failures share 401 with missing credentials
            ServiceError::Unauthenticated(_) | ServiceError::Forbidden(_) => StatusCode::UNAUTHORIZED,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let title = status.canonical_reason().unwrap_or("Error");
        let detail = match &self.0 {
            ServiceError::Unavailable(msg) => {
                error!(code = self.0.code(), error = %msg, "store unavailable");
                None
            }
            other => Some(other.message().to_string()),
        };
        (status, Json(ErrorBody { error: title, detail })).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_status() {
        let cases = [
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Conflict("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::AlreadyExists("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotLiked("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Unauthenticated("x".into()), StatusCode::UNAUTHORIZED),
            (ServiceError::Forbidden("x".into()), StatusCode::UNAUTHORIZED),
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServiceError::Unavailable("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError(err).status(), status);
        }
    }

    async fn body_of(resp: Response) -> (StatusCode, String) {
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn unavailable_detail_is_withheld() {
        let resp = JsonApiError(ServiceError::Unavailable("connection refused at 10.0.0.3".into())).into_response();
        let (status, raw) = body_of(resp).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!raw.contains("10.0.0.3"));
        let body: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Internal Server Error", "detail": null}));
    }

    #[tokio::test]
    async fn client_errors_carry_their_message() {
        let resp = JsonApiError(ServiceError::not_found("Post")).into_response();
        let (status, raw) = body_of(resp).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Not Found", "detail": "Post not found"}));
    }
}

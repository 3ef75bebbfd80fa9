use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::{ExtractionError, FailureKind};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Messages in the response body are shown to end users and are in Danish.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge { limit } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                format!(
                    "Filen er for stor. Den maksimale størrelse er {:.1} MB.",
                    *limit as f64 / (1024.0 * 1024.0)
                ),
            ),
            AppError::Extraction(e) => {
                let (status, code) = match e {
                    ExtractionError::UnsupportedFormat { .. } => {
                        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_FORMAT")
                    }
                    ExtractionError::ExtractionFailed {
                        kind: FailureKind::DecoderUnavailable,
                        ..
                    } => {
                        tracing::error!("Extraction error: {e}");
                        (StatusCode::SERVICE_UNAVAILABLE, "DECODER_UNAVAILABLE")
                    }
                    ExtractionError::ExtractionFailed { .. } => {
                        tracing::warn!("Extraction error: {e}");
                        (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_FAILED")
                    }
                };
                (status, code, e.user_message().to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_errors_map_to_status() {
        let unsupported = AppError::from(ExtractionError::UnsupportedFormat {
            file_name: "cv.txt".to_string(),
            mime_type: Some("text/plain".to_string()),
        });
        assert_eq!(
            unsupported.into_response().status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );

        let unavailable = AppError::from(ExtractionError::unavailable("worker panicked"));
        assert_eq!(
            unavailable.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );

        let password = AppError::from(ExtractionError::ExtractionFailed {
            kind: FailureKind::PasswordProtected,
            reason: "encrypted".to_string(),
        });
        assert_eq!(
            password.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_payload_too_large_status() {
        let resp = AppError::PayloadTooLarge { limit: 5 * 1024 * 1024 }.into_response();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Per-file failure (scratch-file I/O or extraction). Aborts the whole
    /// batch with a single 500 naming the offending file.
    #[error("Failed to process {filename}: {source}")]
    Processing {
        filename: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Bad Request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Processing { filename, source } => {
                tracing::error!("Processing failed for {}: {:?}", filename, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to process {}: {}", filename, source),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "detail": detail
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_processing_error_message() {
        let err = AppError::Processing {
            filename: "b.pdf".to_string(),
            source: anyhow!("bad header"),
        };
        assert_eq!(err.to_string(), "Failed to process b.pdf: bad header");
    }

    #[tokio::test]
    async fn test_processing_error_response_shape() {
        let err = AppError::Processing {
            filename: "report.pdf".to_string(),
            source: anyhow!("document is encrypted"),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            json["detail"],
            "Failed to process report.pdf: document is encrypted"
        );
    }
}

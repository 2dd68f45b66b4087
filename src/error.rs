use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failures that stop an upload from producing a prediction.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("no image was uploaded")]
    MissingImage,
    #[error("unsupported file type {0:?}; upload a jpg, jpeg or png image")]
    UnsupportedFileType(String),
    #[error("could not read upload: {0}")]
    Multipart(#[from] MultipartError),
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("could not encode image preview: {0}")]
    Preview(#[source] image::ImageError),
    #[error("classification failed: {0:#}")]
    Classification(anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingImage | AppError::Decode(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Multipart(e) => e.status(),
            AppError::Preview(_) | AppError::Classification(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "upload failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::filters::{ErrorKind, FilterError};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetail {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub request_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No image uploaded")]
    MissingImage,

    #[error("Could not decode image: {0}")]
    Decode(String),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid MIME type: {0}")]
    InvalidMimeType(String),

    #[error("Upload exceeds the {0} byte limit")]
    FileTooLarge(u64),

    #[error("Could not encode image: {0}")]
    Encode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            AppError::Decode(_) => Some(ErrorKind::Decode),
            AppError::Filter(e) => Some(e.kind()),
            _ => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingImage
            | AppError::Decode(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Filter(e) => match e.kind() {
                ErrorKind::Processing => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
            AppError::InvalidMimeType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::FileTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Encode(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_problem_detail(&self, request_id: &str) -> ProblemDetail {
        let (code, title) = match self {
            AppError::MissingImage => ("MISSING_IMAGE", "Missing Image"),
            AppError::Decode(_) => ("DECODE_ERROR", "Undecodable Image"),
            AppError::Filter(e) => match e.kind() {
                ErrorKind::Processing => ("PROCESSING_ERROR", "Processing Error"),
                _ => ("PARAMETER_ERROR", "Invalid Parameter"),
            },
            AppError::ValidationError(_) => ("VALIDATION_ERROR", "Validation Error"),
            AppError::InvalidMimeType(_) => ("INVALID_MIME_TYPE", "Invalid MIME Type"),
            AppError::FileTooLarge(_) => ("FILE_TOO_LARGE", "File Too Large"),
            AppError::Encode(_) => ("ENCODE_ERROR", "Encoding Error"),
            AppError::Internal(_) => ("INTERNAL_ERROR", "Internal Error"),
        };

        ProblemDetail {
            problem_type: format!("https://filmgrade.dev/problems/{}", code.to_lowercase()),
            title: title.to_string(),
            status: self.status().as_u16(),
            detail: self.to_string(),
            code: code.to_string(),
            request_id: request_id.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Outside the request middleware (unit tests) there is no id to reuse.
        let request_id = crate::current_request_id()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let problem = self.to_problem_detail(&request_id);

        if problem.status >= 500 {
            tracing::error!(code = %problem.code, "{}", problem.detail);
        } else {
            tracing::warn!(code = %problem.code, "{}", problem.detail);
        }

        let mut response = (self.status(), Json(problem)).into_response();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(crate::REQUEST_ID_HEADER, value);
        }
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::filters::FilterParams;
use crate::models::error::AppError;
use crate::services::render::{OUTPUT_FILENAME, OUTPUT_MIME};
use crate::AppState;

/// Multipart file field carrying the photo; every other field is a filter value.
pub const IMAGE_FIELD: &str = "image";

// ---------------------------------------------------------------------------
// POST /process
// ---------------------------------------------------------------------------

pub async fn process_photo(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut image: Option<Bytes> = None;
    let mut fields: HashMap<String, String> = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, state.config.max_upload_bytes))?
    {
        let name = field.name().unwrap_or_default().to_string();

        // Only a file part counts as the upload; the first one wins.
        if name == IMAGE_FIELD && field.file_name().is_some() {
            if image.is_some() {
                continue;
            }

            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            if !content_type.starts_with("image/") && content_type != "application/octet-stream" {
                return Err(AppError::InvalidMimeType(content_type));
            }

            let data = field
                .bytes()
                .await
                .map_err(|e| multipart_error(e, state.config.max_upload_bytes))?;
            image = Some(data);
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| multipart_error(e, state.config.max_upload_bytes))?;
            // Repeated keys keep their first value, so a later one cannot
            // mask a malformed earlier one.
            fields.entry(name).or_insert(value);
        }
    }

    let data = image.ok_or(AppError::MissingImage)?;
    let params = FilterParams::from_form(&fields)?;

    tracing::debug!(upload_bytes = data.len(), ?params, "processing upload");

    let render = state.render.clone();
    let encoded = tokio::task::spawn_blocking(move || render.process(&data, &params))
        .await
        .map_err(|e| AppError::Internal(format!("Render task failed: {}", e)))??;

    let disposition = format!("attachment; filename=\"{}\"", OUTPUT_FILENAME);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, OUTPUT_MIME.to_string()),
            (header::CONTENT_LENGTH, encoded.len().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        encoded,
    )
        .into_response())
}

fn multipart_error(e: MultipartError, limit: u64) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge(limit)
    } else {
        AppError::ValidationError(format!("Multipart error: {}", e))
    }
}

use std::io::Cursor;
use std::time::Instant;

use image::{DynamicImage, GenericImageView, RgbImage};

use crate::filters::{self, FilterParams};
use crate::models::error::AppError;

pub const OUTPUT_FILENAME: &str = "processed_photo.jpg";
pub const OUTPUT_MIME: &str = "image/jpeg";

/// Decode, filter and re-encode one uploaded photo.
#[derive(Debug, Clone)]
pub struct RenderService {
    jpeg_quality: u8,
}

impl RenderService {
    pub fn new(jpeg_quality: u8) -> Self {
        Self { jpeg_quality }
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    /// CPU-bound; callers on the async runtime should go through
    /// `spawn_blocking`.
    pub fn process(&self, data: &[u8], params: &FilterParams) -> Result<Vec<u8>, AppError> {
        let started = Instant::now();

        let img = load_image(data)?;
        let (width, height) = img.dimensions();

        let rendered = filters::apply_filters(&img, params)?;
        let encoded = encode_jpeg(&rendered, self.jpeg_quality)?;

        tracing::info!(
            width,
            height,
            stages = ?params.active_stages(),
            output_bytes = encoded.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "photo processed",
        );

        Ok(encoded)
    }
}

fn load_image(data: &[u8]) -> Result<DynamicImage, AppError> {
    if data.is_empty() {
        return Err(AppError::Decode("uploaded file is empty".to_string()));
    }
    image::load_from_memory(data).map_err(|e| AppError::Decode(e.to_string()))
}

/// Baseline JPEG; the encoder keeps chroma at full resolution.
fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>, AppError> {
    let mut buf = Cursor::new(Vec::new());
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality);
    encoder
        .encode(img.as_raw(), img.width(), img.height(), image::ExtendedColorType::Rgb8)
        .map_err(|e| AppError::Encode(format!("JPEG encode error: {}", e)))?;
    Ok(buf.into_inner())
}

//! The photo filter pipeline.
//!
//! Stages always run in the same order: brightness, contrast, saturation,
//! fade, grain. A stage whose parameter is absent is skipped; fade and grain
//! additionally require a strictly positive intensity.

pub mod error;
pub mod fade;
pub mod grain;
pub mod params;
pub mod tone;

use image::{DynamicImage, RgbImage};
use rand::Rng;

pub use error::{ErrorKind, FilterError};
pub use params::FilterParams;

/// Runs the pipeline with the thread-local RNG feeding the grain stage.
pub fn apply_filters(image: &DynamicImage, params: &FilterParams) -> Result<RgbImage, FilterError> {
    apply_filters_with_rng(image, params, &mut rand::thread_rng())
}

pub fn apply_filters_with_rng<R: Rng>(
    image: &DynamicImage,
    params: &FilterParams,
    rng: &mut R,
) -> Result<RgbImage, FilterError> {
    // Gray, alpha and 16-bit sources all come out as 8-bit RGB.
    let mut raster = image.to_rgb8();
    let dims = raster.dimensions();

    tracing::debug!(
        width = dims.0,
        height = dims.1,
        stages = ?params.active_stages(),
        "applying filters"
    );

    if let Some(brightness) = params.brightness {
        raster = tone::adjust_brightness(raster, brightness);
        check_dimensions(params::BRIGHTNESS, dims, &raster)?;
    }

    if let Some(contrast) = params.contrast {
        raster = tone::adjust_contrast(raster, contrast);
        check_dimensions(params::CONTRAST, dims, &raster)?;
    }

    if let Some(saturate) = params.saturate {
        raster = tone::adjust_saturation(raster, saturate);
        check_dimensions(params::SATURATE, dims, &raster)?;
    }

    if let Some(fade) = params.fade.filter(|v| *v > 0.0) {
        raster = fade::apply_fade(raster, fade);
        check_dimensions(params::FADE, dims, &raster)?;
    }

    if let Some(amount) = params.grain.filter(|v| *v > 0.0) {
        raster = grain::apply_grain(raster, amount, rng)?;
        check_dimensions(params::GRAIN, dims, &raster)?;
    }

    Ok(raster)
}

fn check_dimensions(stage: &str, expected: (u32, u32), raster: &RgbImage) -> Result<(), FilterError> {
    if raster.dimensions() != expected {
        return Err(FilterError::Processing(format!(
            "{} stage changed dimensions from {}x{} to {}x{}",
            stage,
            expected.0,
            expected.1,
            raster.width(),
            raster.height()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, Rgba, RgbaImage};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn params(pairs: &[(&str, &str)]) -> FilterParams {
        let form: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FilterParams::from_form(&form).unwrap()
    }

    fn gray_2x2() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([128, 128, 128])))
    }

    fn sample_image() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(24, 16, |x, y| {
            Rgb([(x * 10) as u8, (y * 15) as u8, ((x * y) % 256) as u8])
        }))
    }

    #[test]
    fn no_params_is_identity() {
        let img = sample_image();
        let out = apply_filters(&img, &FilterParams::default()).unwrap();
        assert_eq!(out, img.to_rgb8());
    }

    #[test]
    fn zero_brightness_with_fade_below_content_is_noop() {
        let out = apply_filters(&gray_2x2(), &params(&[("brightness", "0"), ("fade", "20")])).unwrap();
        assert!(out.pixels().all(|p| p.0 == [128, 128, 128]));
    }

    #[test]
    fn fade_beyond_nominal_range_lifts_past_content() {
        let out = apply_filters(&gray_2x2(), &params(&[("fade", "60")])).unwrap();
        assert_eq!(out.dimensions(), (2, 2));
        assert!(out.pixels().all(|p| p.0 == [153, 153, 153]));
    }

    #[test]
    fn stages_run_in_fixed_order() {
        // Fade before brightness would give 51 * 0 = 0; the fixed order gives 51.
        let black = DynamicImage::ImageRgb8(RgbImage::new(3, 3));
        let out = apply_filters(&black, &params(&[("fade", "20"), ("brightness", "-100")])).unwrap();
        assert!(out.iter().all(|&v| v == 51));
    }

    #[test]
    fn zero_and_negative_fade_grain_are_skipped() {
        let img = sample_image();
        let out = apply_filters(&img, &params(&[("fade", "0"), ("grain", "0")])).unwrap();
        assert_eq!(out, img.to_rgb8());

        let out = apply_filters(&img, &params(&[("fade", "-10"), ("grain", "-1")])).unwrap();
        assert_eq!(out, img.to_rgb8());
    }

    #[test]
    fn deterministic_without_grain() {
        let img = sample_image();
        let p = params(&[
            ("brightness", "12"),
            ("contrast", "-30"),
            ("saturate", "40"),
            ("fade", "15"),
        ]);
        let a = apply_filters(&img, &p).unwrap();
        let b = apply_filters(&img, &p).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn grain_is_reproducible_with_a_seeded_rng() {
        let img = sample_image();
        let p = params(&[("grain", "5"), ("fade", "10")]);
        let a = apply_filters_with_rng(&img, &p, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = apply_filters_with_rng(&img, &p, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, img.to_rgb8());
    }

    #[test]
    fn grayscale_and_alpha_sources_normalize_to_rgb() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(5, 4, Luma([90])));
        let out = apply_filters(&gray, &FilterParams::default()).unwrap();
        assert_eq!(out.dimensions(), (5, 4));
        assert!(out.pixels().all(|p| p.0 == [90, 90, 90]));

        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 0])));
        let out = apply_filters(&rgba, &FilterParams::default()).unwrap();
        assert!(out.pixels().all(|p| p.0 == [10, 20, 30]));
    }

    #[test]
    fn full_desaturation_through_pipeline() {
        let out = apply_filters(&sample_image(), &params(&[("saturate", "-100")])).unwrap();
        assert!(out.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
    }
}

//! Synthetic film grain.
//!
//! Every channel of every pixel receives its own sample from a zero-mean
//! normal distribution. There is no spatial kernel and no correlation
//! between channels, which reads as fine color grain at full resolution.

use image::RgbImage;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::error::FilterError;
use super::params::GRAIN;

/// Ratio between the user-facing grain amount and the noise standard deviation.
pub const GRAIN_SIGMA_SCALE: f64 = 1.5;

pub fn grain_sigma(amount: f64) -> f64 {
    amount * GRAIN_SIGMA_SCALE
}

pub fn apply_grain<R: Rng>(
    mut img: RgbImage,
    amount: f64,
    rng: &mut R,
) -> Result<RgbImage, FilterError> {
    if !(amount.is_finite() && amount > 0.0) {
        return Err(FilterError::invalid(
            GRAIN,
            amount.to_string(),
            "grain amount must be a positive number",
        ));
    }

    let normal = Normal::new(0.0, grain_sigma(amount))
        .map_err(|e| FilterError::invalid(GRAIN, amount.to_string(), e.to_string()))?;

    // Samples are drawn straight into the flat channel buffer, one per value.
    for (v, noise) in img.iter_mut().zip(normal.sample_iter(&mut *rng)) {
        let noisy: f64 = *v as f64 + noise;
        *v = noisy.clamp(0.0, 255.0) as u8;
    }

    Ok(img)
}

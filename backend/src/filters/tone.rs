//! Brightness, contrast and saturation.
//!
//! All three take a percentage on the `-100..=100` scale and turn it into a
//! multiplicative factor, `0` meaning "leave the image alone".

use image::RgbImage;

const MID_GRAY: f64 = 128.0;

/// BT.601 luma weights.
pub const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

pub fn percent_factor(value: f64) -> f64 {
    (value + 100.0) / 100.0
}

#[inline]
fn to_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    LUMA_WEIGHTS[0] * r as f64 + LUMA_WEIGHTS[1] * g as f64 + LUMA_WEIGHTS[2] * b as f64
}

/// Applies a per-value mapping to every channel through a 256-entry table.
fn apply_lut(mut img: RgbImage, f: impl Fn(f64) -> f64) -> RgbImage {
    let mut lut = [0u8; 256];
    for (i, slot) in lut.iter_mut().enumerate() {
        *slot = to_channel(f(i as f64));
    }
    for v in img.iter_mut() {
        *v = lut[*v as usize];
    }
    img
}

pub fn adjust_brightness(img: RgbImage, brightness: f64) -> RgbImage {
    let factor = percent_factor(brightness);
    apply_lut(img, |v| v * factor)
}

pub fn adjust_contrast(img: RgbImage, contrast: f64) -> RgbImage {
    let factor = percent_factor(contrast);
    apply_lut(img, |v| MID_GRAY + (v - MID_GRAY) * factor)
}

pub fn adjust_saturation(mut img: RgbImage, saturate: f64) -> RgbImage {
    let factor = percent_factor(saturate);
    for pixel in img.pixels_mut() {
        let [r, g, b] = pixel.0;
        let gray = luma(r, g, b);
        pixel.0 = [
            to_channel(gray + (r as f64 - gray) * factor),
            to_channel(gray + (g as f64 - gray) * factor),
            to_channel(gray + (b as f64 - gray) * factor),
        ];
    }
    img
}

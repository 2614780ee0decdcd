//! Matte fade.
//!
//! Lifts the blacks toward a flat gray so shadows read as washed-out film
//! stock. Channels already above the lift are left as they are.

use image::RgbImage;

/// Gray level a fade intensity lifts the blacks to. The nominal `0..=50`
/// range maps onto `0..=127`; larger values keep climbing until white.
pub fn fade_lift(fade: f64) -> u8 {
    (fade * 2.55).floor().clamp(0.0, 255.0) as u8
}

/// Lighten-composites the image against a flat gray layer: every channel
/// becomes `max(channel, lift)`, so shadows flatten into a matte while
/// brighter tones pass through untouched.
pub fn apply_fade(mut img: RgbImage, fade: f64) -> RgbImage {
    let lift = fade_lift(fade);
    if lift == 0 {
        return img;
    }
    for v in img.iter_mut() {
        *v = (*v).max(lift);
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn lift_truncates() {
        assert_eq!(fade_lift(0.0), 0);
        assert_eq!(fade_lift(1.0), 2);
        assert_eq!(fade_lift(20.0), 51);
        assert_eq!(fade_lift(50.0), 127);
        assert_eq!(fade_lift(60.0), 153);
        assert_eq!(fade_lift(500.0), 255);
    }

    #[test]
    fn black_becomes_uniform_lift() {
        let out = apply_fade(RgbImage::new(4, 3), 30.0);
        assert!(out.iter().all(|&v| v == 76));
    }

    #[test]
    fn never_darkens() {
        let img = RgbImage::from_fn(16, 16, |x, y| Rgb([(x * 16) as u8, (y * 16) as u8, 200]));
        let out = apply_fade(img.clone(), 40.0);
        for (before, after) in img.iter().zip(out.iter()) {
            assert!(after >= before);
            assert_eq!(*after, (*before).max(102));
        }
    }

    #[test]
    fn tones_above_lift_pass_through() {
        let img = RgbImage::from_pixel(2, 2, Rgb([128, 128, 128]));
        assert_eq!(apply_fade(img.clone(), 20.0), img);
    }
}

//! Colour type and display conversion.

use lux_math::{Interval, Vec3};

/// Color type alias (linear RGB, channels nominally 0-1)
pub type Color = Vec3;

/// Channel range accepted before scaling to 8 bits.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Apply gamma correction (gamma = 2.0).
///
/// Non-positive input maps to 0 so a stray negative channel can't turn into NaN.
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an accumulated sample sum to 8-bit RGB.
///
/// Each channel is averaged over `samples_per_pixel`, gamma corrected,
/// clamped to `[0, 0.999]` and scaled by 256, so 1.0 maps to 255.
pub fn quantize(pixel_sum: Color, samples_per_pixel: u32) -> [u8; 3] {
    let scale = 1.0 / samples_per_pixel as f32;
    let channel = |c: f32| (256.0 * INTENSITY.clamp(linear_to_gamma(c * scale))) as u8;
    [channel(pixel_sum.x), channel(pixel_sum.y), channel(pixel_sum.z)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-0.5), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_full_intensity_maps_to_255() {
        assert_eq!(quantize(Color::ONE, 1), [255, 255, 255]);
    }

    #[test]
    fn test_quantize_averages_samples() {
        // Four samples summing to 1.0 average to 0.25, gamma gives 0.5
        assert_eq!(quantize(Color::splat(1.0), 4), [128, 128, 128]);
        assert_eq!(quantize(Color::splat(400.0), 100), [255, 255, 255]);
    }

    #[test]
    fn test_quantize_clamps() {
        assert_eq!(quantize(Color::new(-1.0, 0.0, 50.0), 1), [0, 0, 255]);
    }
}

use super::{ensure_positive, normalize::map_normalized};
use crate::error::TransformError;
use image::GrayImage;

/// Power-law parameters used by the batch pipeline
const SCALE: f32 = 1.0;
const GAMMA: f32 = 0.4;

/// Apply the power-law transform with the pipeline's fixed parameters
pub fn apply(image: &GrayImage) -> Result<GrayImage, TransformError> {
    gamma_transform(image, SCALE, GAMMA)
}

/// Power-law (gamma) transform: s = c * r^gamma, r in [0, 1]
///
/// Gamma below 1 brightens shadows, above 1 darkens them.
pub fn gamma_transform(image: &GrayImage, c: f32, gamma: f32) -> Result<GrayImage, TransformError> {
    ensure_positive("gamma scale", c)?;
    ensure_positive("gamma", gamma)?;
    Ok(map_normalized(image, |r| c * r.powf(gamma)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn ramp() -> GrayImage {
        GrayImage::from_fn(16, 16, |x, y| Luma([(y * 16 + x) as u8]))
    }

    #[test]
    fn test_gamma_spans_full_range() {
        let result = apply(&ramp()).unwrap();

        let (min, max) = result
            .pixels()
            .fold((255u8, 0u8), |(lo, hi), p| (lo.min(p.0[0]), hi.max(p.0[0])));
        assert_eq!(min, 0);
        assert_eq!(max, 255);
    }

    #[test]
    fn test_gamma_below_one_brightens() {
        let result = apply(&ramp()).unwrap();

        // (64 / 255)^0.4 is roughly 0.575
        let mapped = result.get_pixel(0, 4).0[0];
        assert!(
            (140..=155).contains(&mapped),
            "Expected ~147 for intensity 64, got {}",
            mapped
        );
    }

    #[test]
    fn test_gamma_above_one_darkens() {
        let result = gamma_transform(&ramp(), 1.0, 2.5).unwrap();
        let mapped = result.get_pixel(0, 8).0[0];
        assert!(mapped < 128, "Expected gamma 2.5 to darken 128, got {}", mapped);
    }

    #[test]
    fn test_gamma_one_is_identity_on_full_ramp() {
        let img = ramp();
        let result = gamma_transform(&img, 1.0, 1.0).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_gamma_rejects_invalid_parameters() {
        let img = ramp();
        assert!(gamma_transform(&img, 1.0, 0.0).is_err());
        assert!(gamma_transform(&img, -2.0, 0.4).is_err());
        assert!(gamma_transform(&img, 1.0, f32::INFINITY).is_err());
    }
}

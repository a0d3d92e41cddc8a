use crate::error::TransformError;
use crate::histogram::BINS;
use image::{GrayImage, Luma};
use imageproc::stats::cumulative_histogram;

/// Global histogram equalization
///
/// Remaps intensities through the cumulative histogram stretched so the
/// darkest occupied level lands on 0 and the brightest on 255:
/// `round((cdf[v] - cdf_min) * 255 / (total - cdf_min))`. An image with a
/// single intensity has nothing to stretch and is returned unchanged.
pub fn apply(image: &GrayImage) -> Result<GrayImage, TransformError> {
    let cdf = cumulative_histogram(image).channels[0];
    let total = cdf[BINS - 1];
    let cdf_min = cdf.iter().copied().find(|&c| c > 0).unwrap_or(0);

    if total == cdf_min {
        return Ok(image.clone());
    }

    let scale = 255.0 / (total - cdf_min) as f32;
    let mut lut = [0u8; BINS];
    for (entry, &count) in lut.iter_mut().zip(cdf.iter()) {
        *entry = (count.saturating_sub(cdf_min) as f32 * scale)
            .round()
            .clamp(0.0, 255.0) as u8;
    }

    let mut equalized = image.clone();
    for pixel in equalized.pixels_mut() {
        *pixel = Luma([lut[pixel.0[0] as usize]]);
    }
    Ok(equalized)
}

use image::{GrayImage, Luma};

/// Map every sample through `f` in floating point and stretch the result
/// back over the full 0-255 range.
///
/// Samples are handed to `f` scaled to [0, 1]. The mapped values are min-max
/// normalized to [0, 1] and quantized with rounding. When the mapped values
/// span no range (constant input) the input is returned unchanged.
pub fn map_normalized<F>(image: &GrayImage, f: F) -> GrayImage
where
    F: Fn(f32) -> f32,
{
    let values: Vec<f32> = image
        .pixels()
        .map(|pixel| f(pixel.0[0] as f32 / 255.0))
        .collect();

    let (min_val, max_val) = find_min_max(&values);
    let range = max_val - min_val;

    // Avoid division by zero
    if !range.is_finite() || range <= f32::EPSILON {
        return image.clone();
    }

    let mut normalized = GrayImage::new(image.width(), image.height());
    for (pixel, &value) in normalized.pixels_mut().zip(values.iter()) {
        *pixel = Luma([quantize((value - min_val) / range)]);
    }
    normalized
}

/// Quantize a unit-range value to 8 bits, saturating outside [0, 1]
fn quantize(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

fn find_min_max(values: &[f32]) -> (f32, f32) {
    values
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &v| {
            (min.min(v), max.max(v))
        })
}

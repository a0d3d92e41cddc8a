use super::{ensure_positive, normalize::map_normalized};
use crate::error::TransformError;
use image::GrayImage;

/// Scale constant used by the batch pipeline
const SCALE: f32 = 1.0;

/// Apply the logarithmic transform with the pipeline's fixed scale
pub fn apply(image: &GrayImage) -> Result<GrayImage, TransformError> {
    log_transform(image, SCALE)
}

/// Logarithmic transform: s = c * ln(1 + r), r in [0, 1]
///
/// The result is min-max normalized before quantization, so `c` only shapes
/// the curve. The output always spans 0-255 unless the input is constant.
pub fn log_transform(image: &GrayImage, c: f32) -> Result<GrayImage, TransformError> {
    ensure_positive("log scale", c)?;
    Ok(map_normalized(image, |r| c * r.ln_1p()))
}

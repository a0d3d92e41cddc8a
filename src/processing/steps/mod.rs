//! Individual transform steps

pub mod clahe;
pub mod equalize;
pub mod gamma;
pub mod log;
pub mod normalize;

use crate::error::TransformError;

/// Reject parameters that are not finite and strictly positive
pub(crate) fn ensure_positive(name: &str, value: f32) -> Result<(), TransformError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TransformError::InvalidParameter(format!(
            "{} must be a positive finite number, got {}",
            name, value
        )))
    }
}

//! Scale calculator: real-world centimeters to document centimeters.

use artdoc_core::{ArtdocError, Result};

/// Convert a real-world measurement to its size on the page.
///
/// `scale` is a divisor: 1 document cm represents `scale` real cm, so a
/// scale of 1 yields a life-size reproduction and a scale of 10 renders a
/// 100 cm artwork 10 cm tall.
///
/// # Errors
///
/// Returns [`ArtdocError::InvalidValue`] for a non-positive or non-finite
/// scale or measurement (both are row-level failures, caught by the row
/// processor).
pub fn to_document_size(measurement: f64, scale: f64) -> Result<f64> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ArtdocError::InvalidValue(format!(
            "scale must be a positive number, got {scale}"
        )));
    }
    if !measurement.is_finite() || measurement <= 0.0 {
        return Err(ArtdocError::InvalidValue(format!(
            "measurement must be a positive number, got {measurement}"
        )));
    }

    let size = measurement / scale;
    if size.is_finite() {
        Ok(size)
    } else {
        Err(ArtdocError::InvalidValue(format!(
            "{measurement} / {scale} is not a usable document size"
        )))
    }
}

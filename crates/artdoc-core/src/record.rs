//! Manifest row model: one artwork image and how to scale and frame it.

use crate::error::{ArtdocError, Result};

/// One row of the image manifest.
///
/// Measurements are real-world centimeters as entered by the user. The
/// frame columns are optional: a row with neither frame dimension is placed
/// without a border, a row with both gets a rendered mat/frame. `frame_type`
/// holds the raw label from the manifest (`"None"` when the cell was empty);
/// it is only interpreted once both frame dimensions are present.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    /// Path to the image file as written in the manifest.
    pub path: String,
    /// Scale divisor: 1 document cm represents `scale` real cm.
    pub scale: f64,
    /// Real artwork height, if entered.
    pub artwork_height: Option<f64>,
    /// Real artwork width, if entered.
    pub artwork_width: Option<f64>,
    /// Real outer frame height, if entered.
    pub frame_height: Option<f64>,
    /// Real outer frame width, if entered.
    pub frame_width: Option<f64>,
    /// Raw frame shape label from the manifest.
    pub frame_type: String,
}

/// Shape of the rendered frame border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameShape {
    /// Flat white border around the padded mat.
    Rectangle,
    /// Black elliptical outline inscribed in the padded mat.
    Ellipse,
}

impl FrameShape {
    /// Map a user-entered label to a shape.
    ///
    /// Case-insensitive. `none`, `rectangle` and `square` are rectangular
    /// (a present-but-unlabeled frame defaults to a rectangle); `circle`
    /// and `oval` are elliptical. Anything else is unrecognized.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "none" | "rectangle" | "square" => Some(Self::Rectangle),
            "circle" | "oval" => Some(Self::Ellipse),
            _ => None,
        }
    }
}

/// How a row should be handled, resolved from its frame columns.
#[derive(Debug, Clone, PartialEq)]
pub enum RowPlan {
    /// No frame dimensions: place the image scaled by its artwork size.
    Unframed,
    /// Both frame dimensions present and the label is recognized.
    Framed(FrameShape),
    /// Both frame dimensions present but the label is not a known shape.
    /// The row is captioned but no image is placed.
    UnknownShape(String),
}

impl ImageRecord {
    /// Resolve the row's processing plan from its frame columns.
    ///
    /// A row with neither frame dimension is unframed regardless of the
    /// `Frame_type` label. A row with exactly one frame dimension violates
    /// the both-or-neither invariant and is a row-level error.
    ///
    /// # Errors
    ///
    /// Returns [`ArtdocError::InvalidValue`] when only one of the two frame
    /// dimensions is present.
    pub fn plan(&self) -> Result<RowPlan> {
        match (self.frame_height, self.frame_width) {
            (None, None) => Ok(RowPlan::Unframed),
            (Some(_), Some(_)) => Ok(match FrameShape::from_label(&self.frame_type) {
                Some(shape) => RowPlan::Framed(shape),
                None => RowPlan::UnknownShape(self.frame_type.clone()),
            }),
            _ => Err(ArtdocError::InvalidValue(format!(
                "{}: frame height and width must be given together",
                self.path
            ))),
        }
    }
}

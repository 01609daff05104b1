//! Per-row output contract handed to the document sink.

/// A rendered image ready to be placed in the output document.
///
/// The pixel data is an owned, already-encoded PNG buffer: each row produces
/// its own buffer and nothing is shared or overwritten between rows, so rows
/// could be processed out of order without a read-before-write hazard.
///
/// `height_cm` is always set. `width_cm` is absent for unframed rows whose
/// manifest did not give an artwork width; the sink then derives the width
/// from the pixel aspect ratio at the given height.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// PNG-encoded pixels of the (possibly framed) image.
    pub png: Vec<u8>,
    /// Pixel width of the encoded image.
    pub width_px: u32,
    /// Pixel height of the encoded image.
    pub height_px: u32,
    /// Target height on the page, in centimeters.
    pub height_cm: f64,
    /// Target width on the page, in centimeters, when tracked.
    pub width_cm: Option<f64>,
}

impl Placement {
    /// Width in centimeters to actually render at: the tracked width, or
    /// one derived from the pixel aspect ratio.
    #[must_use]
    pub fn effective_width_cm(&self) -> f64 {
        self.width_cm.unwrap_or_else(|| {
            self.height_cm * f64::from(self.width_px) / f64::from(self.height_px)
        })
    }
}

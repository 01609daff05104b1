//! Frame compositor
//!
//! Renders a mat/frame border around an artwork image so the rendered
//! artwork-to-frame proportions match the real object's. The mat is a
//! symmetric white padding derived from the real frame-to-artwork ratios;
//! on top of it a rectangle gets a further flat 5 px white edge, an ellipse
//! gets a black 5 px outline inscribed in the padded canvas.

// Clippy pedantic allows:
// - Padding arithmetic intentionally round-trips through f64 and floor(),
//   and ellipse centers/radii convert pixel counts to i32
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use artdoc_core::{ArtdocError, FrameShape, Result};
use image::{imageops, DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_ellipse_mut;

/// Width in pixels reserved for the visible frame edge.
///
/// The padding formula subtracts this allowance per side; the rectangle
/// path adds it back as a flat white expansion, the ellipse path draws its
/// outline at this stroke width.
pub const BORDER_STROKE_PX: u32 = 5;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Symmetric mat padding, in pixels per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddingGeometry {
    /// Padding added to the left and to the right.
    pub width_pad: u32,
    /// Padding added above and below.
    pub height_pad: u32,
}

/// Compute the mat padding for a normalized image.
///
/// With an image of `width`×`height` pixels, real artwork dimensions
/// `artwork_height`/`artwork_width` and real frame dimensions
/// `frame_height`/`frame_width` (all cm):
///
/// ```text
/// height_pad = floor(height * frame_height / artwork_height - height - 5)
/// width_pad  = floor(width  * frame_width  / artwork_width  - width  - 5)
/// ```
///
/// This reproduces the real frame-to-artwork area ratio, minus the fixed
/// 5 px allowance per side for the frame edge itself.
///
/// # Errors
///
/// Returns [`ArtdocError::InvalidValue`] when a dimension is non-positive
/// or non-finite, or when a computed padding is negative (frame smaller
/// than, or barely larger than, the artwork). Negative padding is never
/// clamped.
pub fn compute_padding(
    width: u32,
    height: u32,
    artwork_height: f64,
    artwork_width: f64,
    frame_height: f64,
    frame_width: f64,
) -> Result<PaddingGeometry> {
    for (name, value) in [
        ("artwork height", artwork_height),
        ("artwork width", artwork_width),
        ("frame height", frame_height),
        ("frame width", frame_width),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ArtdocError::InvalidValue(format!(
                "{name} must be a positive number, got {value}"
            )));
        }
    }

    let stroke = f64::from(BORDER_STROKE_PX);
    let height_pad =
        (f64::from(height) * (frame_height / artwork_height) - f64::from(height) - stroke).floor();
    let width_pad =
        (f64::from(width) * (frame_width / artwork_width) - f64::from(width) - stroke).floor();

    if height_pad < 0.0 || width_pad < 0.0 {
        return Err(ArtdocError::InvalidValue(format!(
            "frame {frame_width}x{frame_height} leaves no room around \
             artwork {artwork_width}x{artwork_height}"
        )));
    }

    Ok(PaddingGeometry {
        width_pad: width_pad as u32,
        height_pad: height_pad as u32,
    })
}

/// Render the frame border around an image.
///
/// Both shapes first expand the canvas by the mat padding, filled white,
/// with the artwork centered. The rectangle then grows a further flat
/// [`BORDER_STROKE_PX`] white edge on every side; the ellipse instead draws
/// a black outline of that stroke width inscribed exactly in the padded
/// canvas, so for identical inputs the rectangle canvas is 10 px larger
/// than the ellipse canvas in each axis.
#[must_use]
pub fn render_frame(
    shape: FrameShape,
    image: &DynamicImage,
    padding: PaddingGeometry,
) -> DynamicImage {
    let src = image.to_rgba8();
    let (w, h) = (src.width(), src.height());

    let canvas = match shape {
        FrameShape::Rectangle => {
            let total_w = w + 2 * padding.width_pad + 2 * BORDER_STROKE_PX;
            let total_h = h + 2 * padding.height_pad + 2 * BORDER_STROKE_PX;
            let mut canvas = RgbaImage::from_pixel(total_w, total_h, WHITE);
            imageops::overlay(
                &mut canvas,
                &src,
                i64::from(padding.width_pad + BORDER_STROKE_PX),
                i64::from(padding.height_pad + BORDER_STROKE_PX),
            );
            canvas
        }
        FrameShape::Ellipse => {
            let total_w = w + 2 * padding.width_pad;
            let total_h = h + 2 * padding.height_pad;
            let mut canvas = RgbaImage::from_pixel(total_w, total_h, WHITE);
            imageops::overlay(
                &mut canvas,
                &src,
                i64::from(padding.width_pad),
                i64::from(padding.height_pad),
            );
            draw_ellipse_outline(&mut canvas);
            canvas
        }
    };

    DynamicImage::ImageRgba8(canvas)
}

/// Draw a black ellipse outline inscribed in the canvas bounding box.
///
/// `draw_hollow_ellipse_mut` traces a single-pixel curve, so the stroke is
/// built from [`BORDER_STROKE_PX`] concentric passes shrinking inward.
fn draw_ellipse_outline(canvas: &mut RgbaImage) {
    let center = (
        (canvas.width() / 2) as i32,
        (canvas.height() / 2) as i32,
    );
    for inset in 0..BORDER_STROKE_PX as i32 {
        let rx = (canvas.width() / 2) as i32 - 1 - inset;
        let ry = (canvas.height() / 2) as i32 - 1 - inset;
        if rx <= 0 || ry <= 0 {
            break;
        }
        draw_hollow_ellipse_mut(canvas, center, rx, ry, BLACK);
    }
}

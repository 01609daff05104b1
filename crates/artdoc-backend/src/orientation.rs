//! Orientation normalizer
//!
//! Decodes a raster image and corrects its visual orientation from the
//! standard 8-value EXIF orientation tag, so the pixels appear the way an
//! EXIF-unaware viewer would expect.
//!
//! The correction is a compound transform table, not a set of mutually
//! exclusive branches: the mirror predicate and the rotation predicates are
//! evaluated independently against the same tag value. Tag 7, for example,
//! both mirrors and rotates counter-clockwise; tag 4 both mirrors and
//! rotates 180°.

use artdoc_core::{ArtdocError, Result};
use exif::{In, Tag};
use image::{DynamicImage, ImageReader};
use std::io::Cursor;

/// Decode image bytes and apply the EXIF orientation correction.
///
/// Images without an orientation tag (PNG has none, many JPEGs omit it) are
/// returned unchanged. Malformed or undecodable metadata is skipped, never
/// fatal.
///
/// # Errors
///
/// Returns [`ArtdocError::InvalidValue`] when the bytes cannot be decoded
/// as an image — a row-scoped failure, so one broken file does not stop the
/// batch.
pub fn normalize(data: &[u8]) -> Result<DynamicImage> {
    let img = decode(data)?;
    match orientation_tag(data) {
        Some(tag) => {
            tracing::debug!("Applying EXIF orientation {tag}");
            Ok(apply_orientation(img, tag))
        }
        None => Ok(img),
    }
}

/// Decode image bytes, guessing the format from the content.
fn decode(data: &[u8]) -> Result<DynamicImage> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ArtdocError::InvalidValue(format!("unreadable image data: {e}")))?
        .decode()
        .map_err(|e| ArtdocError::InvalidValue(format!("could not decode image: {e}")))
}

/// Read the EXIF orientation tag value (1-8) if the image carries one.
///
/// The field value is decoded through its display string; values that do
/// not parse as an integer are skipped without error.
#[must_use]
pub fn orientation_tag(data: &[u8]) -> Option<u32> {
    let mut cursor = Cursor::new(data);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|f| f.display_value().to_string().parse::<u32>().ok())
}

/// Apply the corrective transform for an orientation tag value.
///
/// Mirror first, then rotation; the rotation arms are exclusive among
/// themselves but independent of the mirror:
///
/// | tag        | transform                       |
/// |------------|---------------------------------|
/// | 2, 4, 5, 7 | horizontal mirror               |
/// | 5, 6       | rotate 90° clockwise            |
/// | 7, 8       | rotate 90° counter-clockwise    |
/// | 3, 4       | rotate 180°                     |
///
/// Tag 1 (and any out-of-range value) is the identity. The canvas expands
/// to fit on the quarter-turn rotations.
#[must_use]
pub fn apply_orientation(img: DynamicImage, tag: u32) -> DynamicImage {
    let mut img = img;
    if matches!(tag, 2 | 4 | 5 | 7) {
        img = img.fliph();
    }
    if matches!(tag, 5 | 6) {
        img = img.rotate90();
    } else if matches!(tag, 7 | 8) {
        img = img.rotate270();
    } else if matches!(tag, 3 | 4) {
        img = img.rotate180();
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    // A 2x3 fixture with every pixel distinct:
    //
    //   A B        A=(10) B=(20)
    //   C D        C=(30) D=(40)
    //   E F        E=(50) F=(60)
    fn fixture() -> DynamicImage {
        let mut img = RgbaImage::new(2, 3);
        for (i, px) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)]
            .iter()
            .enumerate()
        {
            let v = (i as u8 + 1) * 10;
            img.put_pixel(px.0, px.1, Rgba([v, 0, 0, 255]));
        }
        DynamicImage::ImageRgba8(img)
    }

    fn red_at(img: &DynamicImage, x: u32, y: u32) -> u8 {
        img.to_rgba8().get_pixel(x, y).0[0]
    }

    /// Collect the red channel row by row for easy grid comparison.
    fn grid(img: &DynamicImage) -> Vec<u8> {
        let rgba = img.to_rgba8();
        let mut out = Vec::new();
        for y in 0..rgba.height() {
            for x in 0..rgba.width() {
                out.push(rgba.get_pixel(x, y).0[0]);
            }
        }
        out
    }

    const A: u8 = 10;
    const B: u8 = 20;
    const C: u8 = 30;
    const D: u8 = 40;
    const E: u8 = 50;
    const F: u8 = 60;

    #[test]
    fn test_tag_1_is_identity() {
        let out = apply_orientation(fixture(), 1);
        assert_eq!((out.width(), out.height()), (2, 3));
        assert_eq!(grid(&out), vec![A, B, C, D, E, F]);
    }

    #[test]
    fn test_tag_2_mirrors() {
        let out = apply_orientation(fixture(), 2);
        assert_eq!((out.width(), out.height()), (2, 3));
        assert_eq!(grid(&out), vec![B, A, D, C, F, E]);
    }

    #[test]
    fn test_tag_3_rotates_180() {
        let out = apply_orientation(fixture(), 3);
        assert_eq!((out.width(), out.height()), (2, 3));
        assert_eq!(grid(&out), vec![F, E, D, C, B, A]);
    }

    #[test]
    fn test_tag_4_mirrors_then_rotates_180() {
        // Compound case: mirror + 180° nets a vertical flip.
        let out = apply_orientation(fixture(), 4);
        assert_eq!((out.width(), out.height()), (2, 3));
        assert_eq!(grid(&out), vec![E, F, C, D, A, B]);
    }

    #[test]
    fn test_tag_5_mirrors_then_rotates_clockwise() {
        let out = apply_orientation(fixture(), 5);
        assert_eq!((out.width(), out.height()), (3, 2));
        assert_eq!(grid(&out), vec![F, D, B, E, C, A]);
    }

    #[test]
    fn test_tag_6_rotates_clockwise() {
        let out = apply_orientation(fixture(), 6);
        assert_eq!((out.width(), out.height()), (3, 2));
        assert_eq!(grid(&out), vec![E, C, A, F, D, B]);
    }

    #[test]
    fn test_tag_7_mirrors_then_rotates_counter_clockwise() {
        // Compound case: the result is the transpose of the original.
        let out = apply_orientation(fixture(), 7);
        assert_eq!((out.width(), out.height()), (3, 2));
        assert_eq!(grid(&out), vec![A, C, E, B, D, F]);
    }

    #[test]
    fn test_tag_8_rotates_counter_clockwise() {
        let out = apply_orientation(fixture(), 8);
        assert_eq!((out.width(), out.height()), (3, 2));
        assert_eq!(grid(&out), vec![B, D, F, A, C, E]);
    }

    #[test]
    fn test_out_of_range_tag_is_identity() {
        for tag in [0, 9, 42, u32::MAX] {
            let out = apply_orientation(fixture(), tag);
            assert_eq!(grid(&out), vec![A, B, C, D, E, F], "tag {tag}");
        }
    }

    #[test]
    fn test_orientation_tag_absent_on_garbage() {
        assert_eq!(orientation_tag(b"not an image at all"), None);
        assert_eq!(orientation_tag(b""), None);
    }

    #[test]
    fn test_orientation_tag_absent_on_plain_png() {
        let mut buf = Vec::new();
        fixture()
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        assert_eq!(orientation_tag(&buf), None);
    }

    #[test]
    fn test_normalize_roundtrips_plain_png() {
        let mut buf = Vec::new();
        fixture()
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();

        let out = normalize(&buf).unwrap();
        assert_eq!((out.width(), out.height()), (2, 3));
        assert_eq!(red_at(&out, 0, 0), A);
        assert_eq!(red_at(&out, 1, 2), F);
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        match normalize(b"\x00\x01\x02\x03") {
            Err(ArtdocError::InvalidValue(_)) => {}
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
    }
}

//! Row processor
//!
//! Drives one manifest row at a time through the pipeline: orientation
//! correction, optional frame compositing, then placement and caption in
//! the document sink. The two recognized row-level failure kinds (bad
//! values, missing fields) are recorded as diagnostics and the batch
//! continues; any other error aborts the run.

use crate::docx::DocumentSink;
use crate::frame::{compute_padding, render_frame};
use crate::manifest::Manifest;
use crate::orientation;
use crate::scale::to_document_size;
use artdoc_core::{
    ArtdocError, Diagnostic, DiagnosticKind, FrameShape, ImageRecord, Placement, Result, RowPlan,
    RunReport,
};
use image::{DynamicImage, GenericImageView};
use std::io::Cursor;

/// Remediation hint for value/arithmetic problems.
const VALUE_HINT: &str = "Check the height, width and scale values for this row";
/// Remediation hint for structurally broken rows.
const STRUCTURE_HINT: &str = "The manifest row is malformed; regenerate the manifest or contact support";
/// Remediation hint for unrecognized shape labels.
const SHAPE_HINT: &str = "Use rectangle, square, circle, oval or none as the frame type";

/// What a single row contributed to the document.
enum RowOutcome {
    /// Image placed and caption appended.
    Placed,
    /// Shape label unrecognized: caption appended, no image. Carries the
    /// offending label.
    CaptionOnly(String),
}

/// Process every manifest row into the sink, collecting diagnostics.
///
/// Rows are independent and handled strictly in file order. A row that
/// fails with one of the two recoverable kinds is logged and skipped; the
/// document still receives every row that succeeded.
///
/// # Errors
///
/// Propagates any error outside the two row-scoped kinds (unwritable sink,
/// internal imaging failures) — these abort the batch.
pub fn process_manifest<S: DocumentSink>(manifest: &Manifest, sink: &mut S) -> Result<RunReport> {
    let mut report = RunReport::new();

    for (row, parsed) in manifest.entries() {
        report.count_row();
        match parsed {
            Ok(record) => match process_row(record, sink) {
                Ok(RowOutcome::Placed) => {
                    tracing::info!("Placed {}", record.path);
                    report.count_image();
                    report.count_caption();
                }
                Ok(RowOutcome::CaptionOnly(label)) => {
                    tracing::warn!(
                        "Skipping image for {}: unrecognized frame shape {label:?}",
                        record.path
                    );
                    report.count_caption();
                    report.push(Diagnostic {
                        row,
                        file: record.path.clone(),
                        message: format!("unrecognized frame shape {label:?}; image not placed"),
                        hint: SHAPE_HINT.to_string(),
                        kind: DiagnosticKind::SkippedShape,
                    });
                }
                Err(error) => match diagnostic_for(row, &record.path, &error) {
                    Some(diagnostic) => {
                        tracing::warn!("Skipping row {row}: {error}");
                        report.push(diagnostic);
                    }
                    None => return Err(error),
                },
            },
            Err(error) => match diagnostic_for(row, "", error) {
                Some(diagnostic) => {
                    tracing::warn!("Skipping row {row}: {error}");
                    report.push(diagnostic);
                }
                // Manifest parsing only produces row-scoped errors; anything
                // else would be a bug upstream, surface it as fatal.
                None => return Err(ArtdocError::Manifest(error.to_string())),
            },
        }
    }

    Ok(report)
}

/// Build the diagnostic for a row-scoped error, or `None` if the error is
/// not one of the two recoverable kinds.
fn diagnostic_for(row: usize, file: &str, error: &ArtdocError) -> Option<Diagnostic> {
    match error {
        ArtdocError::InvalidValue(message) => Some(Diagnostic {
            row,
            file: file.to_string(),
            message: message.clone(),
            hint: VALUE_HINT.to_string(),
            kind: DiagnosticKind::InvalidValue,
        }),
        ArtdocError::MissingField(message) => Some(Diagnostic {
            row,
            file: file.to_string(),
            message: format!("missing field {message}"),
            hint: STRUCTURE_HINT.to_string(),
            kind: DiagnosticKind::MissingField,
        }),
        _ => None,
    }
}

/// Run one row: decide the path, transform, hand off to the sink.
fn process_row<S: DocumentSink>(record: &ImageRecord, sink: &mut S) -> Result<RowOutcome> {
    match record.plan()? {
        // Unrecognized shapes never load the image: caption only.
        RowPlan::UnknownShape(label) => {
            sink.append_caption(&record.path)?;
            Ok(RowOutcome::CaptionOnly(label))
        }
        plan => {
            let data = std::fs::read(&record.path).map_err(|e| {
                ArtdocError::InvalidValue(format!("cannot read image file {}: {e}", record.path))
            })?;
            let img = orientation::normalize(&data)?;

            let placement = match plan {
                RowPlan::Unframed => place_unframed(record, &img)?,
                RowPlan::Framed(shape) => place_framed(record, &img, shape)?,
                RowPlan::UnknownShape(_) => unreachable!("handled above"),
            };

            sink.place_image(&placement)?;
            sink.append_caption(&record.path)?;
            Ok(RowOutcome::Placed)
        }
    }
}

/// Direct placement: the artwork's own life size over the scale.
fn place_unframed(record: &ImageRecord, img: &DynamicImage) -> Result<Placement> {
    let artwork_height = record.artwork_height.ok_or_else(|| {
        ArtdocError::InvalidValue(format!("{}: no life-size height given", record.path))
    })?;
    let height_cm = to_document_size(artwork_height, record.scale)?;
    let width_cm = record
        .artwork_width
        .map(|w| to_document_size(w, record.scale))
        .transpose()?;

    Ok(Placement {
        png: encode_png(img)?,
        width_px: img.width(),
        height_px: img.height(),
        height_cm,
        width_cm,
    })
}

/// Framed placement: composite the mat/border, then size by the FRAME
/// dimensions — the rendered frame, not the inner artwork, is what must
/// come out at the right physical size.
fn place_framed(record: &ImageRecord, img: &DynamicImage, shape: FrameShape) -> Result<Placement> {
    let artwork_height = record.artwork_height.ok_or_else(|| {
        ArtdocError::InvalidValue(format!("{}: no life-size height given", record.path))
    })?;
    let artwork_width = record.artwork_width.ok_or_else(|| {
        ArtdocError::InvalidValue(format!("{}: no life-size width given", record.path))
    })?;
    let frame_height = record.frame_height.ok_or_else(|| {
        ArtdocError::InvalidValue(format!("{}: no frame height given", record.path))
    })?;
    let frame_width = record.frame_width.ok_or_else(|| {
        ArtdocError::InvalidValue(format!("{}: no frame width given", record.path))
    })?;

    let padding = compute_padding(
        img.width(),
        img.height(),
        artwork_height,
        artwork_width,
        frame_height,
        frame_width,
    )?;
    let framed = render_frame(shape, img, padding);

    let height_cm = to_document_size(frame_height, record.scale)?;
    let width_cm = Some(to_document_size(frame_width, record.scale)?);

    Ok(Placement {
        png: encode_png(&framed)?,
        width_px: framed.width(),
        height_px: framed.height(),
        height_cm,
        width_cm,
    })
}

fn encode_png(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| ArtdocError::Image(format!("failed to encode rendered image: {e}")))?;
    Ok(buf)
}

//! Document sink: where placed images and captions end up.
//!
//! The row processor talks to the output document through the
//! [`DocumentSink`] trait, so tests can record calls without touching the
//! filesystem. The production implementation, [`DocxSink`], assembles a
//! Word document with docx-rs: fixed A4 pages, 25.4 mm margins, 12.7 mm
//! header/footer distance, each image sized in centimeters and followed by
//! its caption paragraph.

use artdoc_core::{ArtdocError, Placement, Result};
use docx_rs::{Docx, PageMargin, Paragraph, Pic, Run};
use std::mem;
use std::path::Path;

/// A4 portrait page, in twentieths of a point (210 × 297 mm).
const PAGE_WIDTH_TWIPS: u32 = 11906;
const PAGE_HEIGHT_TWIPS: u32 = 16838;
/// 25.4 mm margin on all sides.
const MARGIN_TWIPS: i32 = 1440;
/// 12.7 mm header/footer distance.
const HEADER_FOOTER_TWIPS: i32 = 720;

/// English Metric Units per centimeter (914400 EMU per inch).
const EMU_PER_CM: f64 = 360_000.0;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cm_to_emu(cm: f64) -> u32 {
    (cm * EMU_PER_CM).round() as u32
}

/// Receiver for the per-row output of the pipeline.
pub trait DocumentSink {
    /// Place an image at the current insertion point, sized in centimeters.
    ///
    /// # Errors
    /// Returns an error if the image cannot be appended.
    fn place_image(&mut self, placement: &Placement) -> Result<()>;

    /// Append a caption paragraph.
    ///
    /// # Errors
    /// Returns an error if the paragraph cannot be appended.
    fn append_caption(&mut self, text: &str) -> Result<()>;

    /// Persist the document to `path`.
    ///
    /// # Errors
    /// Returns an error if the document cannot be built or written.
    fn finalize(&mut self, path: &Path) -> Result<()>;
}

/// Word document sink backed by docx-rs.
#[derive(Debug)]
pub struct DocxSink {
    docx: Docx,
}

impl DocxSink {
    /// Create a sink with the fixed A4 page geometry.
    #[must_use]
    pub fn new() -> Self {
        let docx = Docx::new()
            .page_size(PAGE_WIDTH_TWIPS, PAGE_HEIGHT_TWIPS)
            .page_margin(
                PageMargin::new()
                    .top(MARGIN_TWIPS)
                    .bottom(MARGIN_TWIPS)
                    .left(MARGIN_TWIPS)
                    .right(MARGIN_TWIPS)
                    .header(HEADER_FOOTER_TWIPS)
                    .footer(HEADER_FOOTER_TWIPS),
            );
        Self { docx }
    }
}

impl Default for DocxSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSink for DocxSink {
    fn place_image(&mut self, placement: &Placement) -> Result<()> {
        let width_emu = cm_to_emu(placement.effective_width_cm());
        let height_emu = cm_to_emu(placement.height_cm);
        let pic = Pic::new(&placement.png).size(width_emu, height_emu);

        self.docx = mem::take(&mut self.docx)
            .add_paragraph(Paragraph::new().add_run(Run::new().add_image(pic)));
        Ok(())
    }

    fn append_caption(&mut self, text: &str) -> Result<()> {
        self.docx = mem::take(&mut self.docx)
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)));
        Ok(())
    }

    fn finalize(&mut self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        mem::take(&mut self.docx)
            .build()
            .pack(file)
            .map_err(|e| ArtdocError::Document(format!("failed to write document: {e}")))?;
        tracing::info!("Saved document to {}", path.display());
        Ok(())
    }
}

//! # artdoc-backend — artwork scaling pipeline
//!
//! Turns a CSV manifest of artwork photographs into placements for a
//! print-ready document, one row at a time:
//!
//! 1. [`orientation`] — decode the image and correct it per its EXIF
//!    orientation tag
//! 2. [`scale`] — map real-world centimeters to document centimeters
//! 3. [`frame`] — optionally composite a proportional mat/frame border
//!    (rectangle or ellipse)
//! 4. [`processor`] — drive the above per manifest row, collect diagnostics
//!
//! Supporting modules: [`manifest`] (CSV template writer and reader) and
//! [`docx`] (the [`DocumentSink`] seam plus the docx-rs A4 implementation).
//!
//! ## Example
//!
//! ```no_run
//! use artdoc_backend::docx::{DocumentSink, DocxSink};
//! use artdoc_backend::manifest::Manifest;
//! use artdoc_backend::processor::process_manifest;
//! use std::path::Path;
//!
//! let manifest = Manifest::load(Path::new("artworks.csv"))?;
//! let mut sink = DocxSink::new();
//! let report = process_manifest(&manifest, &mut sink)?;
//! sink.finalize(Path::new("artworks.docx"))?;
//!
//! for message in report.messages() {
//!     eprintln!("{message}");
//! }
//! # Ok::<(), artdoc_core::ArtdocError>(())
//! ```

pub mod docx;
pub mod frame;
pub mod manifest;
pub mod orientation;
pub mod processor;
pub mod scale;

// Re-exports for convenience
pub use docx::{DocumentSink, DocxSink};
pub use frame::{compute_padding, render_frame, PaddingGeometry, BORDER_STROKE_PX};
pub use manifest::{write_template, Manifest};
pub use processor::process_manifest;
pub use scale::to_document_size;

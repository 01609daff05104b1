//! Manifest I/O
//!
//! The manifest is a CSV file with one row per artwork image:
//!
//! | column | meaning |
//! |---|---|
//! | `Image_file` | path to the image |
//! | `Scale` | divisor, 1 document cm per `Scale` real cm |
//! | `Artwork_life_size_height` / `Artwork_life_size_width` | real artwork cm, may be blank |
//! | `Artwork_frame_height` / `Artwork_frame_width` | real outer frame cm, may be blank |
//! | `Frame_type` | shape label, blank means `None` |
//!
//! `write_template` produces a fresh manifest from an image folder with the
//! measurement columns left blank for the user to fill in; [`Manifest::load`]
//! reads one back. Loading is eager and row errors are carried per row, so
//! a single bad line never hides the rest of the batch.

use artdoc_core::{ArtdocError, ImageRecord, Result};
use csv::StringRecord;
use std::fs;
use std::path::Path;

/// Manifest column headers, in file order.
pub const COLUMNS: [&str; 7] = [
    "Image_file",
    "Scale",
    "Artwork_life_size_height",
    "Artwork_life_size_width",
    "Artwork_frame_height",
    "Artwork_frame_width",
    "Frame_type",
];

/// File extensions picked up by [`write_template`], compared lowercased.
const IMAGE_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// List an image folder and write a template manifest for it.
///
/// Every `.jpg`/`.png` file (case-insensitive) gets a row with the given
/// scale, blank measurement cells and a `Frame_type` of `None`. Entries are
/// sorted by name so reruns are deterministic. Returns the number of rows
/// written.
///
/// # Errors
///
/// - [`ArtdocError::Io`] when the folder cannot be read.
/// - [`ArtdocError::InvalidValue`] for a non-positive scale.
/// - [`ArtdocError::Manifest`] when the folder contains no images (check
///   that you selected the right folder) or the CSV cannot be written.
pub fn write_template(image_dir: &Path, csv_path: &Path, scale: f64) -> Result<usize> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ArtdocError::InvalidValue(format!(
            "scale must be a positive number, got {scale}"
        )));
    }

    let mut images = Vec::new();
    for entry in fs::read_dir(image_dir)? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()));
        if is_image {
            images.push(path);
        }
    }
    images.sort();

    if images.is_empty() {
        return Err(ArtdocError::Manifest(format!(
            "no .jpg or .png files in {}; check that you selected the right folder",
            image_dir.display()
        )));
    }

    let mut writer = csv::Writer::from_path(csv_path)
        .map_err(|e| ArtdocError::Manifest(format!("cannot create manifest: {e}")))?;
    writer
        .write_record(COLUMNS)
        .map_err(|e| ArtdocError::Manifest(format!("cannot write manifest header: {e}")))?;
    let scale_text = scale.to_string();
    for image in &images {
        let path_text = image.to_string_lossy();
        writer
            .write_record([path_text.as_ref(), scale_text.as_str(), "", "", "", "", "None"])
            .map_err(|e| ArtdocError::Manifest(format!("cannot write manifest row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| ArtdocError::Manifest(format!("cannot write manifest: {e}")))?;

    tracing::info!(
        "Prepared manifest {} with {} rows",
        csv_path.display(),
        images.len()
    );
    Ok(images.len())
}

/// Positions of the expected columns in the header, if present.
#[derive(Debug, Clone, Copy, Default)]
struct Columns {
    image_file: Option<usize>,
    scale: Option<usize>,
    artwork_height: Option<usize>,
    artwork_width: Option<usize>,
    frame_height: Option<usize>,
    frame_width: Option<usize>,
    frame_type: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        Self {
            image_file: find("Image_file"),
            scale: find("Scale"),
            artwork_height: find("Artwork_life_size_height"),
            artwork_width: find("Artwork_life_size_width"),
            frame_height: find("Artwork_frame_height"),
            frame_width: find("Artwork_frame_width"),
            frame_type: find("Frame_type"),
        }
    }
}

/// A loaded manifest: every data row, parsed or failed, in file order.
#[derive(Debug)]
pub struct Manifest {
    entries: Vec<(usize, Result<ImageRecord>)>,
}

impl Manifest {
    /// Read and parse a manifest file.
    ///
    /// The file is read eagerly. Field-level problems (missing columns,
    /// unparsable numbers) are stored per row and surface later as row
    /// diagnostics; only an unreadable or structurally broken CSV is fatal.
    ///
    /// # Errors
    ///
    /// Returns [`ArtdocError::Manifest`] when the file cannot be opened or
    /// read as CSV.
    pub fn load(csv_path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(csv_path)
            .map_err(|e| {
                ArtdocError::Manifest(format!("cannot open {}: {e}", csv_path.display()))
            })?;

        let headers = reader
            .headers()
            .map_err(|e| ArtdocError::Manifest(format!("cannot read manifest header: {e}")))?
            .clone();
        let columns = Columns::locate(&headers);

        let mut entries = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let row = index + 1;
            let record = record
                .map_err(|e| ArtdocError::Manifest(format!("cannot read manifest row {row}: {e}")))?;
            entries.push((row, parse_row(columns, &record)));
        }

        tracing::info!("Loaded {} manifest rows from {}", entries.len(), csv_path.display());
        Ok(Self { entries })
    }

    /// Iterate rows in file order as `(1-based row, parse result)`.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &Result<ImageRecord>)> {
        self.entries.iter().map(|(row, result)| (*row, result))
    }

    /// Number of data rows (parsed or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the manifest has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fetch a raw cell, or the structural error for a missing column/short row.
fn cell<'a>(record: &'a StringRecord, column: Option<usize>, name: &str) -> Result<&'a str> {
    column
        .and_then(|i| record.get(i))
        .ok_or_else(|| ArtdocError::MissingField(name.to_string()))
}

/// A cell that must hold a positive number.
fn required_positive(record: &StringRecord, column: Option<usize>, name: &str) -> Result<f64> {
    let text = cell(record, column, name)?.trim();
    if text.is_empty() {
        return Err(ArtdocError::MissingField(name.to_string()));
    }
    parse_positive(text, name)
}

/// A measurement cell: blank and `nan` mean "not entered".
fn optional_positive(
    record: &StringRecord,
    column: Option<usize>,
    name: &str,
) -> Result<Option<f64>> {
    let text = cell(record, column, name)?.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    parse_positive(text, name).map(Some)
}

fn parse_positive(text: &str, name: &str) -> Result<f64> {
    let value: f64 = text.parse().map_err(|_| {
        ArtdocError::InvalidValue(format!("{name} is not a number: {text:?}"))
    })?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ArtdocError::InvalidValue(format!(
            "{name} must be a positive number, got {text}"
        )));
    }
    Ok(value)
}

fn parse_row(columns: Columns, record: &StringRecord) -> Result<ImageRecord> {
    let path = cell(record, columns.image_file, "Image_file")?.trim();
    if path.is_empty() {
        return Err(ArtdocError::MissingField("Image_file".to_string()));
    }
    let path = path.to_string();

    let scale = required_positive(record, columns.scale, "Scale")?;
    let artwork_height =
        optional_positive(record, columns.artwork_height, "Artwork_life_size_height")?;
    let artwork_width =
        optional_positive(record, columns.artwork_width, "Artwork_life_size_width")?;
    let frame_height = optional_positive(record, columns.frame_height, "Artwork_frame_height")?;
    let frame_width = optional_positive(record, columns.frame_width, "Artwork_frame_width")?;

    let frame_type = cell(record, columns.frame_type, "Frame_type")?.trim();
    let frame_type = if frame_type.is_empty() {
        "None".to_string()
    } else {
        frame_type.to_string()
    };

    Ok(ImageRecord {
        path,
        scale,
        artwork_height,
        artwork_width,
        frame_height,
        frame_width,
        frame_type,
    })
}

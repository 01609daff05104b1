//! Error types for the artwork scaling pipeline.
//!
//! Two variants are row-scoped and recoverable — the row processor records
//! them as diagnostics and moves on to the next row. Everything else aborts
//! the run.

use thiserror::Error;

/// Error types that can occur while producing a scaled-artwork document.
///
/// # Examples
///
/// ```
/// use artdoc_core::{ArtdocError, Result};
///
/// fn check_scale(scale: f64) -> Result<f64> {
///     if scale > 0.0 {
///         Ok(scale)
///     } else {
///         Err(ArtdocError::InvalidValue(format!(
///             "scale must be positive, got {scale}"
///         )))
///     }
/// }
///
/// assert!(check_scale(2.0).is_ok());
/// assert!(check_scale(0.0).is_err());
/// ```
#[derive(Error, Debug)]
pub enum ArtdocError {
    /// Bad or inconsistent input on a single manifest row.
    ///
    /// Covers unparsable or non-positive numeric cells, frame dimensions
    /// smaller than the artwork, and image files that cannot be read or
    /// decoded. Row-scoped: the batch continues.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A manifest row is structurally incomplete.
    ///
    /// A required column is missing from the header or the row is shorter
    /// than the header. Row-scoped: the batch continues.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// File I/O error outside row scope.
    ///
    /// Unwritable output location, unreadable image folder. Fatal to the
    /// run. (Per-row image read failures are reported as [`Self::InvalidValue`]
    /// so they stay row-scoped.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The manifest itself cannot be read or parsed as CSV.
    ///
    /// Fatal to the run.
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Internal imaging failure (e.g. re-encoding a rendered frame).
    ///
    /// Not one of the two recognized row-level kinds, so it propagates.
    #[error("Image error: {0}")]
    Image(String),

    /// Output document could not be assembled or saved.
    ///
    /// Fatal to the run.
    #[error("Document error: {0}")]
    Document(String),
}

impl ArtdocError {
    /// Whether this error is one of the two row-scoped kinds the row
    /// processor recovers from.
    #[inline]
    #[must_use]
    pub const fn is_row_scoped(&self) -> bool {
        matches!(self, Self::InvalidValue(_) | Self::MissingField(_))
    }
}

/// Type alias for [`Result<T, ArtdocError>`].
pub type Result<T> = std::result::Result<T, ArtdocError>;

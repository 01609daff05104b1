//! # artdoc-core — shared types for the artwork scaling pipeline
//!
//! Data model and error types used by the `artdoc-backend` pipeline and the
//! `artdoc` CLI:
//!
//! - [`record`] — manifest rows ([`ImageRecord`]) and their resolved
//!   processing plan ([`RowPlan`], [`FrameShape`])
//! - [`placement`] — the per-row output contract ([`Placement`])
//! - [`report`] — run-scoped diagnostics ([`RunReport`], [`Diagnostic`])
//! - [`error`] — [`ArtdocError`] and the crate-wide [`Result`] alias

pub mod error;
pub mod placement;
pub mod record;
pub mod report;

// Re-exports for convenience
pub use error::{ArtdocError, Result};
pub use placement::Placement;
pub use record::{FrameShape, ImageRecord, RowPlan};
pub use report::{Diagnostic, DiagnosticKind, RunReport};

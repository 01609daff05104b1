//! Run diagnostics: an ordered, run-scoped record of skipped rows.
//!
//! The report is owned by a single processing run and handed back to the
//! caller when the run completes; nothing accumulates in process-wide state.

use std::fmt;

/// What kind of trouble a row ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Bad or inconsistent values (dimensions, scale, unreadable image).
    InvalidValue,
    /// Structurally incomplete row or missing manifest column.
    MissingField,
    /// Frame shape label was not recognized; the row was captioned but no
    /// image was placed.
    SkippedShape,
}

/// One skipped or degraded row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based data row number in the manifest.
    pub row: usize,
    /// Image file the row referred to (may be empty if the path itself was
    /// missing).
    pub file: String,
    /// What went wrong.
    pub message: String,
    /// What the user should do about it.
    pub hint: String,
    /// Classification of the problem.
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.file.is_empty() {
            write!(f, "row {}: {}. {}", self.row, self.message, self.hint)
        } else {
            write!(
                f,
                "row {} ({}): {}. {}",
                self.row, self.file, self.message, self.hint
            )
        }
    }
}

/// Outcome of one processing run.
#[derive(Debug, Default)]
pub struct RunReport {
    diagnostics: Vec<Diagnostic>,
    rows_total: usize,
    images_placed: usize,
    captions_appended: usize,
}

impl RunReport {
    /// Create an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a processed manifest row (whatever its outcome).
    pub fn count_row(&mut self) {
        self.rows_total += 1;
    }

    /// Record a successfully placed image.
    pub fn count_image(&mut self) {
        self.images_placed += 1;
    }

    /// Record an appended caption.
    pub fn count_caption(&mut self) {
        self.captions_appended += 1;
    }

    /// Append a diagnostic. Order of insertion is preserved.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// All diagnostics, in row order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Human-readable diagnostic strings for the control surface.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }

    /// Number of manifest rows seen.
    #[must_use]
    pub const fn rows_total(&self) -> usize {
        self.rows_total
    }

    /// Number of images placed in the document.
    #[must_use]
    pub const fn images_placed(&self) -> usize {
        self.images_placed
    }

    /// Number of captions appended to the document.
    #[must_use]
    pub const fn captions_appended(&self) -> usize {
        self.captions_appended
    }

    /// True when every row placed an image.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostic(row: usize, kind: DiagnosticKind) -> Diagnostic {
        Diagnostic {
            row,
            file: "a.jpg".to_string(),
            message: "frame smaller than artwork".to_string(),
            hint: "Check the height, width and scale values for this row".to_string(),
            kind,
        }
    }

    #[test]
    fn test_display_names_file_and_hint() {
        let d = diagnostic(3, DiagnosticKind::InvalidValue);
        let text = d.to_string();
        assert_eq!(
            text,
            "row 3 (a.jpg): frame smaller than artwork. \
             Check the height, width and scale values for this row"
        );
    }

    #[test]
    fn test_display_without_file() {
        let d = Diagnostic {
            row: 1,
            file: String::new(),
            message: "row is shorter than the header".to_string(),
            hint: "contact support".to_string(),
            kind: DiagnosticKind::MissingField,
        };
        assert_eq!(
            d.to_string(),
            "row 1: row is shorter than the header. contact support"
        );
    }

    #[test]
    fn test_report_preserves_order() {
        let mut report = RunReport::new();
        report.push(diagnostic(2, DiagnosticKind::InvalidValue));
        report.push(diagnostic(5, DiagnosticKind::MissingField));
        report.push(diagnostic(7, DiagnosticKind::SkippedShape));

        let rows: Vec<usize> = report.diagnostics().iter().map(|d| d.row).collect();
        assert_eq!(rows, vec![2, 5, 7]);
        assert_eq!(report.messages().len(), 3);
    }

    #[test]
    fn test_report_counters() {
        let mut report = RunReport::new();
        for _ in 0..3 {
            report.count_row();
        }
        report.count_image();
        report.count_image();
        report.count_caption();

        assert_eq!(report.rows_total(), 3);
        assert_eq!(report.images_placed(), 2);
        assert_eq!(report.captions_appended(), 1);
        assert!(report.is_clean());
    }

    #[test]
    fn test_report_not_clean_after_diagnostic() {
        let mut report = RunReport::new();
        report.push(diagnostic(1, DiagnosticKind::SkippedShape));
        assert!(!report.is_clean());
    }
}

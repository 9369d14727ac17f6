//! # codesnap
//!
//! Codebase snapshot tool with OOXML spreadsheet extraction.
//!
//! codesnap walks a directory tree, renders a textual tree diagram, and
//! concatenates every file's contents into one report. Spreadsheet files in
//! the zip+XML OOXML family (.xlsx, .xlsm, .xltx, .xltm) are substituted
//! with a structured text dump produced by a minimal built-in reader that
//! reconstructs sheet names, tab order, and cell values without a full
//! spreadsheet library.
//!
//! ## Quick Start
//!
//! ```no_run
//! // Dump one spreadsheet as tab-separated text
//! let text = codesnap::extract_sheet_text("data.xlsx")?;
//! println!("{}", text);
//!
//! // Snapshot a whole directory into a report file
//! use codesnap::snapshot::SnapshotOptions;
//!
//! let options = SnapshotOptions::default();
//! let mut out = std::fs::File::create(&options.output_name)?;
//! codesnap::write_snapshot(".", &mut out, &options)?;
//! # Ok::<(), codesnap::Error>(())
//! ```
//!
//! Extraction always produces the best available text: a missing or corrupt
//! shared-string table degrades to an empty one, an unusable workbook
//! manifest falls back to filename-ordered sheets, and dangling references
//! resolve to nothing. Only a file that does not open as a ZIP container at
//! all is reported as an error.

pub mod container;
pub mod detect;
pub mod error;
pub mod snapshot;
pub mod xlsx;

// Re-exports
pub use container::SheetContainer;
pub use detect::{is_binary_file, is_spreadsheet_path, is_zip_file, SPREADSHEET_EXTENSIONS};
pub use error::{Error, Result};
pub use snapshot::{snapshot_to_string, write_snapshot, SnapshotOptions};
pub use xlsx::XlsxExtractor;

use std::path::Path;

/// Extract a plain-text rendering from an OOXML spreadsheet file.
///
/// Fails only when the file cannot be opened as a ZIP container; every
/// other anomaly degrades per the fallback rules, so a partial or garbled
/// workbook still yields its best available text.
///
/// # Example
///
/// ```no_run
/// let text = codesnap::extract_sheet_text("data.xlsx")?;
/// for line in text.lines() {
///     println!("{}", line);
/// }
/// # Ok::<(), codesnap::Error>(())
/// ```
pub fn extract_sheet_text(path: impl AsRef<Path>) -> Result<String> {
    let extractor = XlsxExtractor::open(path)?;
    Ok(extractor.extract())
}

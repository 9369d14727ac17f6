//! OOXML spreadsheet (.xlsx family) extraction.
//!
//! A minimal reader for the zip+XML spreadsheet container: shared strings,
//! workbook-declared sheet order, and tab-separated cell values, without a
//! full spreadsheet library.
//!
//! # Example
//!
//! ```no_run
//! use codesnap::xlsx::XlsxExtractor;
//!
//! let extractor = XlsxExtractor::open("data.xlsx")?;
//! println!("{}", extractor.extract());
//! # Ok::<(), codesnap::Error>(())
//! ```

mod extractor;
mod shared_strings;
mod workbook;

pub use extractor::{XlsxExtractor, EMPTY_SHEET_PLACEHOLDER};
pub use shared_strings::SharedStrings;
pub use workbook::{ResolvedSheet, SheetDecl};

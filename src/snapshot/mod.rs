//! Codebase snapshot assembly.
//!
//! Walks a directory tree, renders a tree diagram, and concatenates file
//! contents into one report, routing spreadsheet files through the
//! extractor and summarizing binary files instead of embedding them.
//!
//! # Example
//!
//! ```no_run
//! use codesnap::snapshot::{write_snapshot, SnapshotOptions};
//!
//! let options = SnapshotOptions::default().with_exclude_dir("target");
//! let mut out = std::fs::File::create("files_with_code.txt")?;
//! write_snapshot(".", &mut out, &options)?;
//! # Ok::<(), codesnap::Error>(())
//! ```

mod options;
mod report;
mod tree;

pub use options::{
    SnapshotOptions, DEFAULT_EXCLUDE_DIRS, DEFAULT_EXCLUDE_FILES, DEFAULT_OUTPUT_NAME,
};
pub use report::{snapshot_to_string, write_snapshot};
pub use tree::render_tree;

//! Error types for the codesnap library.

use std::io;
use thiserror::Error;

/// Result type alias for codesnap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a snapshot or extracting a spreadsheet.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a readable ZIP container.
    #[error("container error: {0}")]
    Container(String),

    /// An XML part did not parse.
    #[error("format error: {0}")]
    Format(String),

    /// A named part is absent from the container.
    #[error("part not found: {0}")]
    PartNotFound(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Container(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Format(err.to_string())
    }
}

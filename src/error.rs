//! Error types for ocglayers.

use std::io;
use thiserror::Error;

/// Result type alias for ocglayers operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting layers.
///
/// The first group is what callers see: every failure at the document
/// boundary is converted into one of them, with the underlying message kept.
/// The second group is raised below that boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// No input path was given.
    #[error("Usage: ocglayers <input.ai>")]
    MissingArgument,

    /// The command line could not be parsed.
    #[error("{0}")]
    InvalidArgument(String),

    /// The document could not be opened or parsed at all.
    #[error("{0}")]
    OpenFailure(String),

    /// The document has no pages.
    #[error("No pages")]
    NoPages,

    /// The document declares no optional content groups.
    #[error("No OCG layers found")]
    NoLayersDeclared,

    /// No property binding on the page resolved to a declared layer.
    #[error("Could not map MC references to layers")]
    BindingResolutionFailure,

    /// The page content stream could not be fetched or decoded.
    #[error("Failed to read content stream: {0}")]
    ContentReadFailure(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// I/O error when reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a PDF-compatible container.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header carries an unreadable version.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// A required PDF object is missing.
    #[error("Missing required object: {0}")]
    MissingObject(String),

    /// Error during JSON rendering.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

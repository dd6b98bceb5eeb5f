//! Error type used by the crate.

use thiserror::Error;
use zip::result::ZipError;

/// Error enum.
#[derive(Debug, Error)]
pub enum KmlError {
    /// The input is not a well-formed XML document.
    #[error("malformed XML: {0}")]
    Xml(String),
    /// The input is XML, but not a valid KML document.
    #[error("invalid KML: {0}")]
    Format(String),
    /// Geometry of the given type cannot be converted.
    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometry(String),
    /// Failed to read or write a zip container.
    #[error("archive error: {0}")]
    Archive(String),
    /// Failed to write output.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for KmlError {
    fn from(value: quick_xml::Error) -> Self {
        Self::Xml(value.to_string())
    }
}

impl From<ZipError> for KmlError {
    fn from(value: ZipError) -> Self {
        Self::Archive(value.to_string())
    }
}

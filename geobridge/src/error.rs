//! Error types used by the crate.

use geobridge_kml::KmlError;
use thiserror::Error;
use zip::result::ZipError;

/// Geobridge error type.
#[derive(Debug, Error)]
pub enum GeoBridgeError {
    /// Input is not a valid GeoJSON or KML document.
    #[error("invalid input: {0}")]
    Format(String),
    /// Geometry of the given type is not supported by the target format.
    #[error("geometry type {0} is not supported")]
    UnsupportedGeometry(String),
    /// File extension is not one of the supported formats.
    #[error("unsupported file type '{0}': expected .kml, .geojson or .json")]
    UnsupportedFileType(String),
    /// No geometry found where at least one is required.
    #[error("no geometry found")]
    EmptyGeometry,
    /// Position inputs contain no geometries.
    #[error("no positions found in the uploaded files")]
    NoPositionData,
    /// Corrupt zip container.
    #[error("invalid archive: {0}")]
    Archive(String),
    /// I/O error while reading or writing data.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Error while processing the named input file.
    #[error("{file}: {source}")]
    InFile {
        /// Name of the input.
        file: String,
        /// Error that happened.
        source: Box<GeoBridgeError>,
    },
}

impl GeoBridgeError {
    /// Attaches the name of the input file to the error.
    pub fn in_file(self, file: impl Into<String>) -> Self {
        Self::InFile {
            file: file.into(),
            source: Box::new(self),
        }
    }

    /// The error without file context.
    pub fn root(&self) -> &GeoBridgeError {
        match self {
            Self::InFile { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<KmlError> for GeoBridgeError {
    fn from(value: KmlError) -> Self {
        match value {
            KmlError::Xml(_) | KmlError::Format(_) => Self::Format(value.to_string()),
            KmlError::UnsupportedGeometry(name) => Self::UnsupportedGeometry(name),
            KmlError::Archive(message) => Self::Archive(message),
            KmlError::Io(e) => Self::Io(e),
        }
    }
}

impl From<geojson::Error> for GeoBridgeError {
    fn from(value: geojson::Error) -> Self {
        Self::Format(format!("invalid GeoJSON: {value}"))
    }
}

impl From<serde_json::Error> for GeoBridgeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Format(format!("invalid JSON: {value}"))
    }
}

impl From<ZipError> for GeoBridgeError {
    fn from(value: ZipError) -> Self {
        Self::Archive(value.to_string())
    }
}

//! Entry points of the conversion and validation requests.
//!
//! Every function takes the uploaded files as byte slices and returns either the produced file with its media type
//! and suggested file name, or a [`GeoBridgeError`] describing which input failed.

use std::path::Path;

use geobridge_kml::{kmz, KmlDocumentOptions};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GeoBridgeError;
use crate::geojson;
use crate::source::{read_main_geometry, read_position_geometries};
use crate::validation::{validate, AreaComparison, ValidationConfig};

/// Media type of a produced file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MediaType {
    /// KML document.
    Kml,
    /// KMZ archive.
    Kmz,
    /// GeoJSON document.
    GeoJson,
}

impl MediaType {
    /// MIME type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kml => "application/vnd.google-earth.kml+xml",
            Self::Kmz => "application/vnd.google-earth.kmz",
            Self::GeoJson => "application/json",
        }
    }

    /// File extension (without the dot) for files of this type.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Kml => "kml",
            Self::Kmz => "kmz",
            Self::GeoJson => "geojson",
        }
    }
}

/// File produced by a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    /// File content.
    pub content: Vec<u8>,
    /// Media type of the content.
    pub media_type: MediaType,
    /// Suggested name of the file.
    pub file_name: String,
}

/// Uploaded file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InputFile<'a> {
    /// Name of the file as given by the uploader. The extension determines the format of the file.
    pub name: &'a str,
    /// File content.
    pub content: &'a [u8],
}

impl<'a> InputFile<'a> {
    /// Creates a new input file.
    pub fn new(name: &'a str, content: &'a [u8]) -> Self {
        Self { name, content }
    }
}

/// Converts a GeoJSON feature collection into a KML document.
///
/// The result is named after the input file with the `.kml` extension, or `output.kml` if the input name has no stem
/// (e.g. `.json`).
pub fn geojson_to_kml(file_name: &str, bytes: &[u8]) -> Result<ConvertedFile, GeoBridgeError> {
    let input = non_empty(file_name, bytes)?;
    let features = geojson::decode(input).map_err(|e| e.in_file(file_name))?;
    let content = geobridge_kml::encode(&features, &KmlDocumentOptions::default())
        .map_err(|e| GeoBridgeError::from(e).in_file(file_name))?;

    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty() && !(s.starts_with('.') && path.extension().is_none()))
        .unwrap_or("output");

    Ok(ConvertedFile {
        content,
        media_type: MediaType::Kml,
        file_name: format!("{stem}.{}", MediaType::Kml.extension()),
    })
}

/// Converts a KML document into a GeoJSON feature collection named `output.geojson`.
pub fn kml_to_geojson(bytes: &[u8]) -> Result<ConvertedFile, GeoBridgeError> {
    let input = non_empty("input", bytes)?;
    let features = geobridge_kml::decode(input)?;

    Ok(ConvertedFile {
        content: geojson::encode(&features)?,
        media_type: MediaType::GeoJson,
        file_name: format!("output.{}", MediaType::GeoJson.extension()),
    })
}

/// Packs the uploaded KML files into a KMZ archive named `merged.kmz`.
///
/// Files without the `.kml` extension are skipped. Fails with [`GeoBridgeError::Format`] if no files are given at
/// all.
pub fn kml_files_to_kmz(files: &[InputFile]) -> Result<ConvertedFile, GeoBridgeError> {
    if files.is_empty() {
        return Err(GeoBridgeError::Format("no files uploaded".into()));
    }

    let content = kmz::package(files.iter().map(|f| (f.name, f.content)))?;

    Ok(ConvertedFile {
        content,
        media_type: MediaType::Kmz,
        file_name: format!("merged.{}", MediaType::Kmz.extension()),
    })
}

/// Checks that the position files cover the same area and location as the main file.
///
/// All geometries of the main file are merged into the reference geometry, all geometries of the position files
/// (raw files or zip archives) are compared against it with [`validate`].
pub fn check_area_and_location(
    main: InputFile,
    positions: &[InputFile],
    config: &ValidationConfig,
) -> Result<AreaComparison, GeoBridgeError> {
    let main_geometry = read_main_geometry(main.name, main.content)?;

    let mut position_geometries = vec![];
    for file in positions {
        position_geometries.extend(read_position_geometries(file.name, file.content)?);
    }

    log::debug!(
        "Comparing {} with {} position geometries from {} files",
        main.name,
        position_geometries.len(),
        positions.len()
    );

    validate(&main_geometry, position_geometries, config)
}

fn non_empty<'a>(file_name: &str, bytes: &'a [u8]) -> Result<&'a [u8], GeoBridgeError> {
    if bytes.is_empty() {
        Err(GeoBridgeError::Format("no file uploaded".into()).in_file(file_name))
    } else {
        Ok(bytes)
    }
}

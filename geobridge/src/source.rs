//! Reading of uploaded files: format dispatch by file name and extraction of zip archives.

use std::io::{Cursor, Read};

use geobridge_types::{Feature, Geom};
use zip::ZipArchive;

use crate::error::GeoBridgeError;
use crate::geojson;
use crate::union::union;

/// Signature of a zip local file header.
const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";

/// Maximum ratio between the extracted size of all entries and the archive size. Deflate cannot compress better
/// than about 1:1032, so only malformed archives or zip bombs exceed it.
const MAX_EXPANSION_RATIO: usize = 1100;

/// Format of a vector data file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// KML document (`.kml`).
    Kml,
    /// GeoJSON feature collection (`.geojson` or `.json`).
    GeoJson,
}

impl FileFormat {
    /// Detects the format by the extension of the file name (case insensitive).
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        if extension.eq_ignore_ascii_case("kml") {
            Some(Self::Kml)
        } else if extension.eq_ignore_ascii_case("geojson") || extension.eq_ignore_ascii_case("json") {
            Some(Self::GeoJson)
        } else {
            None
        }
    }

    /// Decodes features from the file content.
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<Feature>, GeoBridgeError> {
        match self {
            Self::Kml => Ok(geobridge_kml::decode(bytes)?),
            Self::GeoJson => geojson::decode(bytes),
        }
    }
}

/// Decodes a file choosing the codec by the file name.
///
/// Fails with [`GeoBridgeError::UnsupportedFileType`] if the extension is not `.kml`, `.geojson` or `.json`.
pub fn decode_file(file_name: &str, bytes: &[u8]) -> Result<Vec<Feature>, GeoBridgeError> {
    let format = FileFormat::from_file_name(file_name)
        .ok_or_else(|| GeoBridgeError::UnsupportedFileType(file_name.to_string()))?;
    format.decode(bytes)
}

/// Reads the main file as a single geometry, merging all its features with [`union`].
///
/// Fails with [`GeoBridgeError::EmptyGeometry`] if the file contains no geometries.
pub fn read_main_geometry(file_name: &str, bytes: &[u8]) -> Result<Geom, GeoBridgeError> {
    if bytes.is_empty() {
        return Err(GeoBridgeError::Format("uploaded file is empty".into()).in_file(file_name));
    }

    let features = decode_file(file_name, bytes).map_err(|e| e.in_file(file_name))?;
    log::debug!("Read {} features from main file {file_name}", features.len());

    union(features.into_iter().map(|f| f.geometry).collect()).map_err(|e| e.in_file(file_name))
}

/// Reads all geometries of a position upload.
///
/// The upload is either a zip archive (detected by the `.zip` or `.kmz` extension or by the content) or a single
/// KML or GeoJSON file. Archive entries and raw files with unknown extensions are skipped.
pub fn read_position_geometries(file_name: &str, bytes: &[u8]) -> Result<Vec<Geom>, GeoBridgeError> {
    if is_zip_archive(file_name, bytes) {
        let mut geometries = vec![];
        for (entry_name, content) in extract_archive(bytes).map_err(|e| e.in_file(file_name))? {
            geometries.extend(read_geometries(&entry_name, &content)?);
        }

        Ok(geometries)
    } else {
        read_geometries(file_name, bytes)
    }
}

fn read_geometries(file_name: &str, bytes: &[u8]) -> Result<Vec<Geom>, GeoBridgeError> {
    let Some(format) = FileFormat::from_file_name(file_name) else {
        log::warn!("Skipping {file_name}: unknown file type");
        return Ok(vec![]);
    };

    let features = format.decode(bytes).map_err(|e| e.in_file(file_name))?;
    log::debug!("Read {} position features from {file_name}", features.len());

    Ok(features.into_iter().map(|f| f.geometry).collect())
}

/// Returns true if the upload should be treated as a zip archive.
pub fn is_zip_archive(file_name: &str, bytes: &[u8]) -> bool {
    let has_archive_extension = file_name.rsplit_once('.').is_some_and(|(_, ext)| {
        ext.eq_ignore_ascii_case("zip") || ext.eq_ignore_ascii_case("kmz")
    });

    has_archive_extension || bytes.starts_with(ZIP_SIGNATURE)
}

/// Extracts all file entries of a zip archive as `(entry name, content)` pairs, in archive order. Directory entries
/// are skipped.
///
/// Entry sizes declared in the archive are not trusted. The total extracted size is limited to
/// [`MAX_EXPANSION_RATIO`] times the archive size, larger archives fail with [`GeoBridgeError::Archive`].
pub fn extract_archive(bytes: &[u8]) -> Result<Vec<(String, Vec<u8>)>, GeoBridgeError> {
    extract_limited(bytes, bytes.len().saturating_mul(MAX_EXPANSION_RATIO))
}

fn extract_limited(
    bytes: &[u8],
    max_extracted: usize,
) -> Result<Vec<(String, Vec<u8>)>, GeoBridgeError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let mut entries = vec![];
    let mut remaining = max_extracted;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        let mut content = vec![];
        let limit = u64::try_from(remaining).unwrap_or(u64::MAX).saturating_add(1);
        entry.by_ref().take(limit).read_to_end(&mut content)?;
        if content.len() > remaining {
            return Err(GeoBridgeError::Archive(format!(
                "archive expands beyond {max_extracted} bytes at entry {name}"
            )));
        }

        remaining -= content.len();
        entries.push((name, content));
    }

    Ok(entries)
}

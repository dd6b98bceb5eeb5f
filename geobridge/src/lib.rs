//! Geobridge converts vector features between GeoJSON, KML and KMZ, and checks whether a set of position files
//! covers the same area and location as a main file.
//!
//! All operations are synchronous and stateless: they take the uploaded bytes and return the produced bytes (see
//! [`ConvertedFile`]) or a validation result.
//!
//! ```
//! use geobridge::{check_area_and_location, geojson_to_kml, InputFile, ValidationConfig};
//!
//! let main = br#"{"type": "FeatureCollection", "features": [{
//!     "type": "Feature", "properties": {"name": "Field"},
//!     "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]]}
//! }]}"#;
//!
//! let kml = geojson_to_kml("field.geojson", main).unwrap();
//! assert_eq!(kml.file_name, "field.kml");
//!
//! let result = check_area_and_location(
//!     InputFile::new("field.geojson", main),
//!     &[InputFile::new("field.kml", &kml.content)],
//!     &ValidationConfig::default(),
//! )
//! .unwrap();
//! assert!(result.is_success());
//! ```

pub mod convert;
pub mod error;
pub mod geojson;
pub mod source;
mod union;
pub mod validation;

pub use convert::{
    check_area_and_location, geojson_to_kml, kml_files_to_kmz, kml_to_geojson, ConvertedFile,
    InputFile, MediaType,
};
pub use error::GeoBridgeError;
pub use source::FileFormat;
pub use union::union;
pub use validation::{validate, AreaComparison, BoundsTolerance, ValidationConfig};

pub use geobridge_kml;
pub use geobridge_types;

//! Reader and writer of KML documents and KMZ archives.
//!
//! Only the vector content of KML is supported: placemarks with point, line string, polygon and multi-geometry
//! geometries, their names and extended data. Styles, overlays, network links and other KML elements are ignored
//! when reading and never written.
//!
//! ```
//! use geobridge_kml::{decode, encode, KmlDocumentOptions};
//!
//! let kml = br#"<kml><Document><Placemark>
//!     <name>Gate</name>
//!     <Point><coordinates>51.389,35.689</coordinates></Point>
//! </Placemark></Document></kml>"#;
//!
//! let features = decode(kml).unwrap();
//! assert_eq!(features[0].name(), Some("Gate"));
//! assert_eq!(features[0].geometry.bounding_rect().unwrap().x_min, 51.389);
//!
//! let written = encode(&features, &KmlDocumentOptions::default()).unwrap();
//! assert_eq!(decode(&written).unwrap(), features);
//! ```

mod convert;
pub mod dom;
pub mod error;
pub mod kmz;
mod reader;
pub mod vector;
mod writer;

pub use convert::{
    decode, document_from_features, encode, features_from_document, geom_to_geometry,
    geometry_to_geom, KmlDocumentOptions, DEFAULT_PLACEMARK_NAME,
};
pub use dom::{KmlDocument, KmlGeometry};
pub use error::KmlError;
pub use writer::KML_NAMESPACE;

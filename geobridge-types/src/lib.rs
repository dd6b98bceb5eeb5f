//! Format independent geometry model used by `geobridge`.
//!
//! All geometries store planar coordinates as `x = longitude`, `y = latitude`. No coordinate transformation is
//! ever applied: file format adapters are responsible for reading and writing coordinates in the order their format
//! requires, and always hand this crate `(lon, lat)` pairs.
//!
//! The model is deliberately small:
//!
//! * [`Point`] - single position,
//! * [`Contour`] - open sequence of points (OGC `LineString`),
//! * [`ClosedContour`] - closed ring, used as polygon boundary,
//! * [`Polygon`] - outer contour with zero or more holes,
//! * [`Geom`] - tagged union of the above plus nested collections.
//!
//! [`Feature`] pairs a geometry with an ordered table of string [`Attributes`].

pub mod error;
pub mod feature;
pub mod geo_types;
pub mod geometry;
pub mod rect;

mod contour;
mod point;
mod polygon;

pub use contour::{ClosedContour, Contour, Winding};
pub use error::GeoTypesError;
pub use feature::{Attributes, Feature};
pub use geometry::{Geom, GeometryKind, Leaves};
pub use point::Point;
pub use polygon::Polygon;
pub use rect::Rect;

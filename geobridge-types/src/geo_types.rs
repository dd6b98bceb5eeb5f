//! Conversions between the crate geometries and [`geo_types`] geometries.
//!
//! `geo_types` is the common currency of the georust algorithms, so these conversions let the model use them (e.g.
//! boolean operations) without reimplementing.

use ::geo_types::{Coord, Geometry, LineString, MultiPolygon};

use crate::contour::{ClosedContour, Contour};
use crate::error::GeoTypesError;
use crate::geometry::Geom;
use crate::point::Point;
use crate::polygon::Polygon;

impl From<Point> for Coord<f64> {
    fn from(value: Point) -> Self {
        Coord {
            x: value.x,
            y: value.y,
        }
    }
}

impl From<Coord<f64>> for Point {
    fn from(value: Coord<f64>) -> Self {
        Point::new(value.x, value.y)
    }
}

fn to_line_string(points: &[Point]) -> LineString<f64> {
    LineString::new(points.iter().copied().map(Coord::from).collect())
}

impl From<&Polygon> for ::geo_types::Polygon<f64> {
    fn from(value: &Polygon) -> Self {
        ::geo_types::Polygon::new(
            to_line_string(value.outer_contour.points()),
            value
                .inner_contours
                .iter()
                .map(|c| to_line_string(c.points()))
                .collect(),
        )
    }
}

impl From<&Geom> for Geometry<f64> {
    fn from(value: &Geom) -> Self {
        match value {
            Geom::Point(p) => Geometry::Point(::geo_types::Point(Coord::from(*p))),
            Geom::LineString(line) => Geometry::LineString(to_line_string(line.points())),
            Geom::Polygon(polygon) => Geometry::Polygon(polygon.into()),
            Geom::Collection(members) => {
                Geometry::GeometryCollection(members.iter().map(Geometry::from).collect())
            }
        }
    }
}

fn ring_from_line_string(line: LineString<f64>) -> Result<ClosedContour, GeoTypesError> {
    ClosedContour::new(line.0.into_iter().map(Point::from).collect())
}

impl TryFrom<::geo_types::Polygon<f64>> for Polygon {
    type Error = GeoTypesError;

    fn try_from(value: ::geo_types::Polygon<f64>) -> Result<Self, Self::Error> {
        let (exterior, interiors) = value.into_inner();
        Ok(Polygon::new(
            ring_from_line_string(exterior)?,
            interiors
                .into_iter()
                .map(ring_from_line_string)
                .collect::<Result<Vec<_>, _>>()?,
        ))
    }
}

impl TryFrom<MultiPolygon<f64>> for Geom {
    type Error = GeoTypesError;

    /// A multipolygon with one part is converted into a plain polygon.
    fn try_from(value: MultiPolygon<f64>) -> Result<Self, Self::Error> {
        let parts = value
            .0
            .into_iter()
            .map(|p| Polygon::try_from(p).map(Geom::Polygon))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Geom::from_parts(parts))
    }
}

impl TryFrom<Geometry<f64>> for Geom {
    type Error = GeoTypesError;

    fn try_from(value: Geometry<f64>) -> Result<Self, Self::Error> {
        match value {
            Geometry::Point(p) => Ok(Geom::Point(p.0.into())),
            Geometry::LineString(line) => Ok(Geom::LineString(Contour::new(
                line.0.into_iter().map(Point::from).collect(),
            )?)),
            Geometry::Polygon(polygon) => Ok(Geom::Polygon(polygon.try_into()?)),
            Geometry::MultiPolygon(mp) => Ok(Geom::Collection(
                mp.0.into_iter()
                    .map(|p| Polygon::try_from(p).map(Geom::Polygon))
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            Geometry::GeometryCollection(collection) => Ok(Geom::Collection(
                collection
                    .0
                    .into_iter()
                    .map(Geom::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            Geometry::Rect(rect) => Geom::try_from(Geometry::Polygon(rect.to_polygon())),
            Geometry::Triangle(triangle) => {
                Geom::try_from(Geometry::Polygon(triangle.to_polygon()))
            }
            Geometry::Line(_) => Err(GeoTypesError::Unsupported("Line".into())),
            Geometry::MultiPoint(_) => Err(GeoTypesError::Unsupported("MultiPoint".into())),
            Geometry::MultiLineString(_) => {
                Err(GeoTypesError::Unsupported("MultiLineString".into()))
            }
        }
    }
}

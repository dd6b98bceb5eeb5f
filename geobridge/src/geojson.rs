//! GeoJSON feature collection reader and writer.
//!
//! Positions are read as `[longitude, latitude]`, any further dimensions are dropped. Properties are converted to
//! string attributes: strings are taken as is, `null` values are skipped and all other values are stored as their
//! JSON text.

use geobridge_types::{Attributes, ClosedContour, Contour, Feature, Geom, GeometryKind, Point, Polygon};
use ::geojson::{FeatureCollection, GeoJson, JsonObject, JsonValue, PolygonType, Position, Value};

use crate::error::GeoBridgeError;

/// Reads a GeoJSON `FeatureCollection`.
///
/// Features without geometry are skipped. Geometry types other than `Point`, `LineString`, `Polygon`,
/// `MultiPolygon` and `GeometryCollection` fail with [`GeoBridgeError::Format`].
pub fn decode(bytes: &[u8]) -> Result<Vec<Feature>, GeoBridgeError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| GeoBridgeError::Format(format!("GeoJSON is not valid UTF-8: {e}")))?;

    let collection = match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection,
        GeoJson::Feature(_) => return Err(not_a_collection("Feature")),
        GeoJson::Geometry(_) => return Err(not_a_collection("Geometry")),
    };

    let mut features = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.into_iter().enumerate() {
        let Some(geometry) = feature.geometry else {
            log::debug!("Skipping feature #{index} without geometry");
            continue;
        };

        features.push(Feature::new(
            value_to_geom(geometry.value)?,
            properties_to_attributes(feature.properties),
        ));
    }

    Ok(features)
}

/// Writes features as a GeoJSON `FeatureCollection`.
///
/// Collections of polygons are written as `MultiPolygon`, other collections as `GeometryCollection`.
pub fn encode(features: &[Feature]) -> Result<Vec<u8>, GeoBridgeError> {
    let collection = FeatureCollection {
        bbox: None,
        features: features
            .iter()
            .map(|f| ::geojson::Feature {
                bbox: None,
                geometry: Some(::geojson::Geometry::new(geom_to_value(&f.geometry))),
                id: None,
                properties: Some(attributes_to_properties(&f.attributes)),
                foreign_members: None,
            })
            .collect(),
        foreign_members: None,
    };

    Ok(serde_json::to_vec(&collection)?)
}

fn not_a_collection(found: &str) -> GeoBridgeError {
    GeoBridgeError::Format(format!("expected a FeatureCollection, found a {found}"))
}

fn properties_to_attributes(properties: Option<JsonObject>) -> Attributes {
    properties
        .into_iter()
        .flatten()
        .filter_map(|(key, value)| match value {
            JsonValue::Null => None,
            JsonValue::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect()
}

fn attributes_to_properties(attributes: &Attributes) -> JsonObject {
    attributes
        .iter()
        .map(|(k, v)| (k.to_string(), JsonValue::String(v.to_string())))
        .collect()
}

fn invalid(e: impl std::fmt::Display) -> GeoBridgeError {
    GeoBridgeError::Format(e.to_string())
}

fn convert_point(position: &Position) -> Result<Point, GeoBridgeError> {
    match position.as_slice() {
        [x, y, ..] => Ok(Point::new(*x, *y)),
        _ => Err(GeoBridgeError::Format(
            "position must contain at least 2 dimensions".into(),
        )),
    }
}

fn convert_points(positions: &[Position]) -> Result<Vec<Point>, GeoBridgeError> {
    positions.iter().map(convert_point).collect()
}

fn convert_polygon(rings: &PolygonType) -> Result<Polygon, GeoBridgeError> {
    let Some((outer, inner)) = rings.split_first() else {
        return Err(GeoBridgeError::Format("polygon has no rings".into()));
    };

    Ok(Polygon::new(
        ClosedContour::new(convert_points(outer)?).map_err(invalid)?,
        inner
            .iter()
            .map(|ring| ClosedContour::new(convert_points(ring)?).map_err(invalid))
            .collect::<Result<Vec<_>, _>>()?,
    ))
}

fn value_to_geom(value: Value) -> Result<Geom, GeoBridgeError> {
    match value {
        Value::Point(p) => Ok(Geom::Point(convert_point(&p)?)),
        Value::LineString(line) => Ok(Geom::LineString(
            Contour::new(convert_points(&line)?).map_err(invalid)?,
        )),
        Value::Polygon(polygon) => Ok(Geom::Polygon(convert_polygon(&polygon)?)),
        Value::MultiPolygon(mp) => Ok(Geom::Collection(
            mp.iter()
                .map(|p| convert_polygon(p).map(Geom::Polygon))
                .collect::<Result<Vec<_>, _>>()?,
        )),
        Value::GeometryCollection(geometries) => Ok(Geom::Collection(
            geometries
                .into_iter()
                .map(|g| value_to_geom(g.value))
                .collect::<Result<Vec<_>, _>>()?,
        )),
        Value::MultiPoint(_) => Err(unsupported("MultiPoint")),
        Value::MultiLineString(_) => Err(unsupported("MultiLineString")),
    }
}

fn unsupported(type_name: &str) -> GeoBridgeError {
    GeoBridgeError::Format(format!("unsupported geometry type {type_name}"))
}

fn position(point: &Point) -> Position {
    vec![point.x, point.y]
}

fn ring_positions(ring: &ClosedContour) -> Vec<Position> {
    ring.points().iter().map(position).collect()
}

fn polygon_rings(polygon: &Polygon) -> PolygonType {
    polygon.iter_contours().map(ring_positions).collect()
}

fn geom_to_value(geom: &Geom) -> Value {
    match geom {
        Geom::Point(p) => Value::Point(position(p)),
        Geom::LineString(line) => Value::LineString(line.points().iter().map(position).collect()),
        Geom::Polygon(polygon) => Value::Polygon(polygon_rings(polygon)),
        Geom::Collection(members) if geom.kind() == GeometryKind::MultiPolygon => {
            Value::MultiPolygon(
                members
                    .iter()
                    .filter_map(|m| match m {
                        Geom::Polygon(polygon) => Some(polygon_rings(polygon)),
                        _ => None,
                    })
                    .collect(),
            )
        }
        Geom::Collection(members) => Value::GeometryCollection(
            members
                .iter()
                .map(|m| ::geojson::Geometry::new(geom_to_value(m)))
                .collect(),
        ),
    }
}

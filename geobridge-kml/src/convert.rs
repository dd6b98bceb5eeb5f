//! Conversion between KML placemarks and [`Feature`]s.

use geobridge_types::feature::NAME_KEY;
use geobridge_types::{Attributes, ClosedContour, Contour, Feature, Geom, Point, Polygon};

use crate::dom::{
    Container, ContainerKind, Data, KmlDocument, KmlFeature, KmlGeometry, KmlPolygon, Placemark,
};
use crate::error::KmlError;
use crate::vector::Vector;

/// Name given to placemarks of features that have no `name` attribute.
pub const DEFAULT_PLACEMARK_NAME: &str = "Unnamed Feature";

/// Properties of the `<Document>` element created by [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmlDocumentOptions {
    /// Document name.
    pub name: String,
    /// Document description.
    pub description: String,
}

impl Default for KmlDocumentOptions {
    fn default() -> Self {
        Self {
            name: "Converted GeoJSON".into(),
            description: "Converted from GeoJSON file".into(),
        }
    }
}

impl KmlDocumentOptions {
    /// Creates options with the given name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Reads all placemarks with a geometry from a KML document, at any nesting depth.
///
/// The placemark name is stored as the `name` attribute, followed by the extended data entries. Placemarks without
/// geometry are skipped. An unsupported geometry fails the whole document.
pub fn decode(bytes: &[u8]) -> Result<Vec<Feature>, KmlError> {
    let document = KmlDocument::read(bytes)?;
    features_from_document(&document)
}

/// Converts placemarks of a parsed document into features. See [`decode`].
pub fn features_from_document(document: &KmlDocument) -> Result<Vec<Feature>, KmlError> {
    let mut features = vec![];
    for placemark in document.placemarks() {
        let Some(geometry) = &placemark.geometry else {
            log::debug!(
                "Skipping placemark {:?} without geometry",
                placemark.name.as_deref().unwrap_or_default()
            );
            continue;
        };

        let mut attributes = Attributes::new();
        if let Some(name) = placemark.name.as_deref().filter(|n| !n.is_empty()) {
            attributes.insert(NAME_KEY, name);
        }
        for Data { name, value } in &placemark.extended_data {
            attributes.insert(name.as_str(), value.as_str());
        }

        features.push(Feature::new(geometry_to_geom(geometry)?, attributes));
    }

    Ok(features)
}

/// Writes features as placemarks of a single `<Document>`.
///
/// Supported geometries are points, lines, polygons and collections of polygons. Any other geometry fails with
/// [`KmlError::UnsupportedGeometry`].
pub fn encode(features: &[Feature], options: &KmlDocumentOptions) -> Result<Vec<u8>, KmlError> {
    document_from_features(features, options)?.write()
}

/// Builds a document containing the features. See [`encode`].
pub fn document_from_features(
    features: &[Feature],
    options: &KmlDocumentOptions,
) -> Result<KmlDocument, KmlError> {
    let placemarks = features
        .iter()
        .map(|f| feature_to_placemark(f).map(KmlFeature::Placemark))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(KmlDocument {
        features: vec![KmlFeature::Container(Container {
            kind: ContainerKind::Document,
            name: Some(options.name.clone()),
            description: Some(options.description.clone()),
            features: placemarks,
        })],
    })
}

fn feature_to_placemark(feature: &Feature) -> Result<Placemark, KmlError> {
    Ok(Placemark {
        name: Some(feature.name().unwrap_or(DEFAULT_PLACEMARK_NAME).to_string()),
        description: None,
        geometry: Some(geom_to_geometry(&feature.geometry)?),
        extended_data: feature
            .attributes
            .iter()
            .filter(|(k, _)| *k != NAME_KEY)
            .map(|(name, value)| Data {
                name: name.to_string(),
                value: value.to_string(),
            })
            .collect(),
    })
}

fn points(vectors: &[Vector]) -> Vec<Point> {
    vectors.iter().copied().map(Point::from).collect()
}

fn vectors(points: &[Point]) -> Vec<Vector> {
    points.iter().copied().map(Vector::from).collect()
}

fn invalid(e: impl std::fmt::Display) -> KmlError {
    KmlError::Format(e.to_string())
}

/// Converts a KML geometry into the model. Altitudes are dropped.
pub fn geometry_to_geom(geometry: &KmlGeometry) -> Result<Geom, KmlError> {
    match geometry {
        KmlGeometry::Point(vector) => Ok(Geom::Point((*vector).into())),
        KmlGeometry::LineString(line) => {
            Ok(Geom::LineString(Contour::new(points(line)).map_err(invalid)?))
        }
        KmlGeometry::Polygon(polygon) => {
            let outer = ClosedContour::new(points(&polygon.outer_boundary)).map_err(invalid)?;
            let inner = polygon
                .inner_boundaries
                .iter()
                .map(|ring| ClosedContour::new(points(ring)).map_err(invalid))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Geom::Polygon(Polygon::new(outer, inner)))
        }
        KmlGeometry::MultiGeometry(parts) => Ok(Geom::Collection(
            parts
                .iter()
                .map(geometry_to_geom)
                .collect::<Result<Vec<_>, _>>()?,
        )),
        KmlGeometry::Unsupported(name) => Err(KmlError::UnsupportedGeometry(name.clone())),
    }
}

fn polygon_to_kml(polygon: &Polygon) -> KmlPolygon {
    KmlPolygon {
        outer_boundary: vectors(polygon.outer_contour.points()),
        inner_boundaries: polygon
            .inner_contours
            .iter()
            .map(|c| vectors(c.points()))
            .collect(),
    }
}

/// Converts a model geometry into KML. Collections are only supported when all their members are polygons.
pub fn geom_to_geometry(geom: &Geom) -> Result<KmlGeometry, KmlError> {
    match geom {
        Geom::Point(point) => Ok(KmlGeometry::Point((*point).into())),
        Geom::LineString(line) => Ok(KmlGeometry::LineString(vectors(line.points()))),
        Geom::Polygon(polygon) => Ok(KmlGeometry::Polygon(polygon_to_kml(polygon))),
        Geom::Collection(members) => {
            let polygons = members
                .iter()
                .map(|m| match m {
                    Geom::Polygon(polygon) => Some(KmlGeometry::Polygon(polygon_to_kml(polygon))),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>();

            match polygons {
                Some(polygons) if !polygons.is_empty() => Ok(KmlGeometry::MultiGeometry(polygons)),
                _ => Err(KmlError::UnsupportedGeometry(geom.kind().to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use geobridge_types::GeometryKind;

    use super::*;

    fn ring(coords: &[(f64, f64)]) -> ClosedContour {
        ClosedContour::new(coords.iter().copied().map(Point::from).collect()).unwrap()
    }

    fn square(x: f64, y: f64) -> Polygon {
        ring(&[(x, y), (x + 1.0, y), (x + 1.0, y + 1.0), (x, y + 1.0), (x, y)]).into()
    }

    #[test]
    fn decode_nested_document() {
        let features = decode(include_bytes!("../test-data/nested.kml")).unwrap();
        assert_eq!(features.len(), 3);

        assert_eq!(features[0].name(), Some("Gate"));
        assert_eq!(
            features[0].geometry,
            Geom::Point(Point::new(51.3890, 35.6892))
        );

        assert_eq!(features[1].geometry.kind(), GeometryKind::LineString);

        let field = &features[2];
        let pairs: Vec<_> = field.attributes.iter().collect();
        assert_eq!(
            pairs,
            vec![("name", "Field & Barn"), ("owner", "Farhad"), ("crop", "wheat")]
        );
        let Geom::Polygon(polygon) = &field.geometry else {
            panic!("expected polygon, got {:?}", field.geometry);
        };
        assert_eq!(polygon.inner_contours.len(), 1);
        assert_eq!(
            polygon.inner_contours[0].points(),
            &[
                Point::new(2.0, 2.0),
                Point::new(4.0, 2.0),
                Point::new(4.0, 4.0),
                Point::new(2.0, 4.0),
                Point::new(2.0, 2.0)
            ]
        );
        assert_abs_diff_eq!(field.geometry.area(), 96.0);
    }

    #[test]
    fn unsupported_geometry_fails_decoding() {
        let kml = br#"<kml><Document>
            <Placemark><Point><coordinates>1,2</coordinates></Point></Placemark>
            <Placemark><LinearRing><coordinates>0,0 1,0 1,1 0,0</coordinates></LinearRing></Placemark>
        </Document></kml>"#;
        assert_matches!(decode(kml), Err(KmlError::UnsupportedGeometry(name)) if name == "LinearRing");
    }

    #[test]
    fn open_ring_fails_decoding() {
        let kml = br#"<kml><Placemark><Polygon><outerBoundaryIs><LinearRing>
            <coordinates>0,0 1,0 1,1 0,1</coordinates>
        </LinearRing></outerBoundaryIs></Polygon></Placemark></kml>"#;
        assert_matches!(decode(kml), Err(KmlError::Format(_)));
    }

    #[test]
    fn encode_then_decode_keeps_coordinates_and_name() {
        let features = vec![
            Feature::new(
                Point::new(51.389, 35.6892),
                Attributes::new().with("name", "Gate").with("kind", "entrance"),
            ),
            Feature::new(
                Geom::Collection(vec![square(0.0, 0.0).into(), square(5.0, 5.0).into()]),
                Attributes::new(),
            ),
        ];

        let bytes = encode(&features, &KmlDocumentOptions::default()).unwrap();
        let decoded = decode(&bytes).unwrap();

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0], features[0]);
        assert_eq!(decoded[1].geometry, features[1].geometry);
        assert_eq!(decoded[1].name(), Some(DEFAULT_PLACEMARK_NAME));
    }

    #[test]
    fn name_is_not_duplicated_in_extended_data() {
        let feature = Feature::new(
            Point::new(1.0, 2.0),
            Attributes::new().with("name", "A").with("height", "12"),
        );
        let document = document_from_features(&[feature], &KmlDocumentOptions::default()).unwrap();
        let placemark = document.placemarks().next().unwrap();

        assert_eq!(placemark.name.as_deref(), Some("A"));
        assert_eq!(
            placemark.extended_data,
            vec![Data {
                name: "height".into(),
                value: "12".into()
            }]
        );
    }

    #[test]
    fn document_options() {
        let options = KmlDocumentOptions::new("Parcels", "Exported parcels");
        let document = document_from_features(&[], &options).unwrap();
        assert_matches!(
            &document.features[0],
            KmlFeature::Container(Container { name: Some(name), description: Some(description), .. })
                if name == "Parcels" && description == "Exported parcels"
        );
    }

    #[test]
    fn heterogeneous_collection_is_rejected() {
        let feature = Feature::new(
            Geom::Collection(vec![Geom::Point(Point::new(0.0, 0.0)), square(0.0, 0.0).into()]),
            Attributes::new(),
        );
        assert_matches!(
            encode(&[feature], &KmlDocumentOptions::default()),
            Err(KmlError::UnsupportedGeometry(name)) if name == "GeometryCollection"
        );
    }
}

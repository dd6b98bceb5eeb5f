use std::io::{Cursor, Read};

use approx::assert_abs_diff_eq;
use assert_matches::assert_matches;
use geobridge::geobridge_types::{Attributes, ClosedContour, Feature, Geom, Point, Polygon, Winding};
use geobridge::{
    geojson, geojson_to_kml, kml_files_to_kmz, kml_to_geojson, GeoBridgeError, InputFile,
    MediaType,
};
use zip::ZipArchive;

const MAIN_SQUARE: &[u8] = include_bytes!("data/main_square.geojson");
const HALVES: &[u8] = include_bytes!("data/halves.kml");
const FIELD_WITH_HOLE: &[u8] = include_bytes!("data/field_with_hole.kml");

fn ring(coords: &[(f64, f64)]) -> ClosedContour {
    ClosedContour::new(coords.iter().copied().map(Point::from).collect()).unwrap()
}

#[test]
fn kml_polygon_with_hole() {
    let converted = kml_to_geojson(FIELD_WITH_HOLE).unwrap();
    assert_eq!(converted.media_type, MediaType::GeoJson);
    assert_eq!(converted.file_name, "output.geojson");

    let features = geojson::decode(&converted.content).unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].name(), Some("Field with pond"));
    assert_eq!(features[0].attributes.get("owner"), Some("Farhad"));

    let Geom::Polygon(polygon) = &features[0].geometry else {
        panic!("expected a polygon, got {:?}", features[0].geometry);
    };
    assert_eq!(polygon.inner_contours.len(), 1);
    assert_eq!(
        polygon.inner_contours[0],
        ring(&[
            (51.42, 35.72),
            (51.42, 35.74),
            (51.44, 35.74),
            (51.44, 35.72),
            (51.42, 35.72),
        ])
    );

    let first = polygon.outer_contour.points()[0];
    assert_eq!(first.lon(), 51.40);
    assert_eq!(first.lat(), 35.70);
}

#[test]
fn geojson_to_kml_and_back() {
    let converted = geojson_to_kml("main_square.geojson", MAIN_SQUARE).unwrap();
    assert_eq!(converted.media_type, MediaType::Kml);
    assert_eq!(converted.file_name, "main_square.kml");

    let text = String::from_utf8(converted.content.clone()).unwrap();
    assert!(text.contains("<name>Main field</name>"));
    assert!(text.contains("<Data name=\"crop\">"));
    assert!(text.contains("0,0 10,0 10,10 0,10 0,0"));

    let back = kml_to_geojson(&converted.content).unwrap();
    assert_eq!(
        geojson::decode(&back.content).unwrap(),
        geojson::decode(MAIN_SQUARE).unwrap()
    );
}

#[test]
fn unnamed_features_get_default_placemark_name() {
    let json = br#"{"type": "FeatureCollection", "features": [{
        "type": "Feature", "properties": {"kind": "well"},
        "geometry": {"type": "Point", "coordinates": [51.389, 35.6892]}
    }]}"#;

    let converted = geojson_to_kml("wells.json", json).unwrap();
    let text = String::from_utf8(converted.content).unwrap();
    assert!(text.contains("<name>Unnamed Feature</name>"));
    assert!(text.contains("<coordinates>51.389,35.6892</coordinates>"));
}

#[test]
fn unsupported_geometry_is_named() {
    let json = br#"{"type": "FeatureCollection", "features": [{
        "type": "Feature", "properties": {},
        "geometry": {"type": "GeometryCollection", "geometries": [
            {"type": "Point", "coordinates": [1, 2]},
            {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}
        ]}
    }]}"#;

    let error = geojson_to_kml("mixed.geojson", json).unwrap_err();
    assert!(error.to_string().contains("mixed.geojson"));
    assert!(error.to_string().contains("GeometryCollection"));
}

#[test]
fn features_round_trip_through_kml() {
    let features = vec![
        Feature::new(
            Polygon::new(
                ring(&[(0.0, 0.0), (0.0, 4.0), (4.0, 4.0), (4.0, 0.0), (0.0, 0.0)]),
                vec![],
            ),
            Attributes::new().with("name", "Clockwise"),
        ),
        Feature::new(
            Point::new(-122.084, 37.422),
            Attributes::new().with("name", "West").with("height", "12"),
        ),
    ];

    let geojson = geojson::encode(&features).unwrap();
    let kml = geojson_to_kml("features.geojson", &geojson).unwrap();
    let back = geojson::decode(&kml_to_geojson(&kml.content).unwrap().content).unwrap();

    assert_eq!(back, features);

    let Geom::Polygon(polygon) = &back[0].geometry else {
        panic!("expected a polygon");
    };
    assert_eq!(polygon.outer_contour.winding(), Winding::Clockwise);
    assert_abs_diff_eq!(back[0].geometry.area(), 16.0);
}

#[test]
fn kmz_packaging() {
    let files = [
        InputFile::new("main.kml", HALVES),
        InputFile::new("pond.KML", FIELD_WITH_HOLE),
        InputFile::new("field.geojson", MAIN_SQUARE),
        InputFile::new("extra.kml", HALVES),
    ];

    let converted = kml_files_to_kmz(&files).unwrap();
    assert_eq!(converted.media_type, MediaType::Kmz);
    assert_eq!(converted.file_name, "merged.kmz");

    let mut archive = ZipArchive::new(Cursor::new(converted.content)).unwrap();
    let names: Vec<_> = archive.file_names().map(str::to_string).collect();
    assert_eq!(names.len(), 3);

    let mut ordered = vec![];
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).unwrap();
        let mut content = vec![];
        entry.read_to_end(&mut content).unwrap();
        ordered.push((entry.name().to_string(), content));
    }

    assert_eq!(ordered[0], ("doc.kml".to_string(), HALVES.to_vec()));
    assert_eq!(ordered[1], ("class2.kml".to_string(), FIELD_WITH_HOLE.to_vec()));
    assert_eq!(ordered[2], ("class3.kml".to_string(), HALVES.to_vec()));
}

#[test]
fn kmz_without_kml_files_is_empty() {
    let converted = kml_files_to_kmz(&[InputFile::new("field.geojson", MAIN_SQUARE)]).unwrap();
    let archive = ZipArchive::new(Cursor::new(converted.content)).unwrap();
    assert!(archive.is_empty());
}

#[test]
fn non_finite_kml_coordinates_are_rejected() {
    let kml = br#"<kml><Placemark>
        <name>Broken</name>
        <Point><coordinates>nan,inf</coordinates></Point>
    </Placemark></kml>"#;

    assert_matches!(
        kml_to_geojson(kml),
        Err(GeoBridgeError::Format(message)) if message.contains("non-finite")
    );
}

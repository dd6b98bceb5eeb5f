use std::io::{Cursor, Write};

use approx::assert_abs_diff_eq;
use assert_matches::assert_matches;
use geobridge::validation::SUCCESS_MESSAGE;
use geobridge::{check_area_and_location, BoundsTolerance, GeoBridgeError, InputFile, ValidationConfig};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const MAIN_SQUARE: &[u8] = include_bytes!("data/main_square.geojson");
const HALVES: &[u8] = include_bytes!("data/halves.kml");
const SHORT: &[u8] = include_bytes!("data/short.geojson");

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(vec![]));
    for (name, content) in entries {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[test]
fn halves_cover_the_main_square() {
    init_logger();

    let result = check_area_and_location(
        InputFile::new("main.geojson", MAIN_SQUARE),
        &[InputFile::new("halves.kml", HALVES)],
        &ValidationConfig::default(),
    )
    .unwrap();

    assert!(result.is_success());
    assert_abs_diff_eq!(result.main_area, 100.0);
    assert_abs_diff_eq!(result.positions_area, 100.0, epsilon = 1e-9);
    assert_eq!(result.to_string(), SUCCESS_MESSAGE);
}

#[test]
fn positions_from_archive() {
    init_logger();

    let archive = zip(&[
        ("halves.kml", HALVES),
        ("readme.txt", b"positions of the field".as_slice()),
    ]);

    let result = check_area_and_location(
        InputFile::new("main.geojson", MAIN_SQUARE),
        &[InputFile::new("positions.zip", &archive)],
        &ValidationConfig::default(),
    )
    .unwrap();

    assert!(result.is_success());
}

#[test]
fn positions_split_between_uploads() {
    init_logger();

    let west = zip(&[("west.geojson", br#"{"type": "FeatureCollection", "features": [{
        "type": "Feature", "properties": {},
        "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [6, 0], [6, 10], [0, 10], [0, 0]]]}
    }]}"#.as_slice())]);
    let east = br#"{"type": "FeatureCollection", "features": [{
        "type": "Feature", "properties": {},
        "geometry": {"type": "Polygon", "coordinates": [[[4, 0], [10, 0], [10, 10], [4, 10], [4, 0]]]}
    }]}"#;

    let result = check_area_and_location(
        InputFile::new("main.geojson", MAIN_SQUARE),
        &[
            InputFile::new("west.kmz", &west),
            InputFile::new("east.json", east),
        ],
        &ValidationConfig::default(),
    )
    .unwrap();

    // Overlap of the two uploads is counted once.
    assert_abs_diff_eq!(result.positions_area, 100.0, epsilon = 1e-9);
    assert!(result.is_success());
}

#[test]
fn area_mismatch_reports_both_areas() {
    init_logger();

    let result = check_area_and_location(
        InputFile::new("main.geojson", MAIN_SQUARE),
        &[InputFile::new("short.geojson", SHORT)],
        &ValidationConfig::default(),
    )
    .unwrap();

    assert!(!result.area_matches);
    assert!(result.bounds_match);
    assert_abs_diff_eq!(result.positions_area, 80.0, epsilon = 1e-9);

    let message = result.to_string();
    assert!(message.starts_with("Area mismatch"));
    assert!(message.contains("main area=100"));
    assert!(message.contains("positions area=80"));
}

#[test]
fn larger_tolerance_accepts_area_difference() {
    let result = check_area_and_location(
        InputFile::new("main.geojson", MAIN_SQUARE),
        &[InputFile::new("short.geojson", SHORT)],
        &ValidationConfig::default().with_tolerance_percent(0.25),
    )
    .unwrap();

    assert!(result.is_success());
}

#[test]
fn bounds_tolerance_follows_area_tolerance_by_default() {
    // Main area 100 with 5% tolerance allows the bounds to be off by 5 units.
    let shifted = br#"{"type": "FeatureCollection", "features": [{
        "type": "Feature", "properties": {},
        "geometry": {"type": "Polygon", "coordinates": [[[4, 4], [14, 4], [14, 14], [4, 14], [4, 4]]]}
    }]}"#;
    let positions = [InputFile::new("shifted.geojson", shifted)];

    let coupled = check_area_and_location(
        InputFile::new("main.geojson", MAIN_SQUARE),
        &positions,
        &ValidationConfig::default(),
    )
    .unwrap();
    assert!(coupled.bounds_match);
    assert_abs_diff_eq!(coupled.bounds_tolerance, 5.0, epsilon = 1e-9);

    let independent = check_area_and_location(
        InputFile::new("main.geojson", MAIN_SQUARE),
        &positions,
        &ValidationConfig::default().with_bounds_tolerance(BoundsTolerance::Absolute(0.001)),
    )
    .unwrap();
    assert!(!independent.bounds_match);
    assert!(independent.area_matches);
}

#[test]
fn uploads_without_positions() {
    let empty = br#"{"type": "FeatureCollection", "features": []}"#;

    assert_matches!(
        check_area_and_location(
            InputFile::new("main.geojson", MAIN_SQUARE),
            &[InputFile::new("empty.geojson", empty)],
            &ValidationConfig::default(),
        ),
        Err(GeoBridgeError::NoPositionData)
    );

    let archive = zip(&[("notes.txt", b"nothing here".as_slice())]);
    assert_matches!(
        check_area_and_location(
            InputFile::new("main.geojson", MAIN_SQUARE),
            &[InputFile::new("positions.zip", &archive)],
            &ValidationConfig::default(),
        ),
        Err(GeoBridgeError::NoPositionData)
    );
}

#[test]
fn unsupported_main_file() {
    assert_matches!(
        check_area_and_location(
            InputFile::new("main.shp", MAIN_SQUARE),
            &[InputFile::new("halves.kml", HALVES)],
            &ValidationConfig::default(),
        )
        .unwrap_err()
        .root(),
        GeoBridgeError::UnsupportedFileType(name) if name == "main.shp"
    );
}

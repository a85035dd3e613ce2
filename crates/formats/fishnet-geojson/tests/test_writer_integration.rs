//! Integration tests for the `GeoJSON` feature sink

use std::fs;

use fishnet_core_common::{FeatureSink, Footprint, Record, SampledRecord};
use fishnet_geojson::{GeoJsonFormat, GeoJsonWriterOptions};
use geo_types::{LineString, Polygon};
use serde_json::{Value, json};
use tempfile::TempDir;

fn rows() -> Vec<SampledRecord> {
    vec![
        SampledRecord {
            id: 1,
            record: Record {
                tid: "501".to_string(),
                category: "Dams".to_string(),
                lat: 31.25,
                lon: 103.5,
                country: "China".to_string(),
                dataset: "GROD".to_string(),
                status: None,
            },
        },
        SampledRecord {
            id: 2,
            record: Record {
                tid: "88".to_string(),
                category: "Locks".to_string(),
                lat: 11.0,
                lon: 105.0,
                country: "Cambodia".to_string(),
                dataset: "MRBD".to_string(),
                status: None,
            },
        },
    ]
}

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_write_points_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sample_points.geojson");

    GeoJsonFormat::default().write_points(&path, &rows()).unwrap();

    let parsed = read_json(&path);
    assert_eq!(parsed["type"], json!("FeatureCollection"));
    let features = parsed["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0]["geometry"]["coordinates"], json!([103.5, 31.25]));
    assert_eq!(features[1]["properties"]["TID"], json!("88"));
    assert_eq!(features[1]["properties"]["ID"], json!(2));
    assert!(parsed.get("crs").is_none());
}

#[test]
fn test_write_footprints_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sample_fishnet.geojson");

    let footprints = vec![Footprint {
        id: 1,
        polygon: Polygon::new(
            LineString::from(vec![
                (0.0, 0.0),
                (0.0, 2.0),
                (2.0, 2.0),
                (2.0, 0.0),
                (0.0, 0.0),
            ]),
            vec![],
        ),
    }];

    let format = GeoJsonFormat::new(GeoJsonWriterOptions::new().with_pretty(true));
    format.write_footprints(&path, &footprints).unwrap();

    let parsed = read_json(&path);
    assert_eq!(
        parsed["crs"]["properties"]["name"],
        json!("urn:ogc:def:crs:EPSG::3857")
    );
    let feature = &parsed["features"][0];
    assert_eq!(feature["geometry"]["type"], json!("Polygon"));
    assert_eq!(feature["properties"], json!({ "ID": 1 }));
}

#[test]
fn test_write_empty_collections() {
    let temp_dir = TempDir::new().unwrap();
    let points = temp_dir.path().join("points.geojson");
    let fishnet = temp_dir.path().join("fishnet.geojson");

    let format = GeoJsonFormat::default();
    format.write_points(&points, &[]).unwrap();
    format.write_footprints(&fishnet, &[]).unwrap();

    assert_eq!(read_json(&points)["features"], json!([]));
    assert_eq!(read_json(&fishnet)["features"], json!([]));
}

#[test]
fn test_write_into_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("points.geojson");

    let err = GeoJsonFormat::default()
        .write_points(&path, &rows())
        .unwrap_err();
    assert!(err.to_string().contains("points.geojson"));
}

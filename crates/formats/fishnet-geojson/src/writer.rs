//! `GeoJSON` feature collection builders and writer.

use std::io::Write;

use fishnet_core_common::{Footprint, SampledRecord};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use serde_json::json;

/// Options for `GeoJSON` writing
#[derive(Debug, Clone, Default)]
pub struct GeoJsonWriterOptions {
    /// Pretty-print the output (default: false)
    pub pretty: bool,
}

impl GeoJsonWriterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the output is pretty-printed
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Legacy named-CRS member, e.g. `{"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::3857"}}`.
///
/// RFC 7946 dropped the `crs` member but GIS tools still honour it, and footprints
/// are not in WGS 84.
#[must_use]
pub fn named_crs_member(epsg: u32) -> JsonObject {
    let mut members = JsonObject::new();
    members.insert(
        "crs".to_string(),
        json!({
            "type": "name",
            "properties": { "name": format!("urn:ogc:def:crs:EPSG::{epsg}") }
        }),
    );
    members
}

/// One point feature per sampled record, in longitude/latitude order.
///
/// Properties mirror the exported table columns.
#[must_use]
pub fn points_collection(rows: &[SampledRecord]) -> FeatureCollection {
    let features = rows
        .iter()
        .map(|row| {
            let record = &row.record;
            let mut properties = JsonObject::new();
            properties.insert("ID".to_string(), JsonValue::from(row.id));
            properties.insert("TID".to_string(), JsonValue::from(record.tid.as_str()));
            properties.insert(
                "Type".to_string(),
                JsonValue::from(record.category.as_str()),
            );
            properties.insert("Lat".to_string(), JsonValue::from(record.lat));
            properties.insert("Lon".to_string(), JsonValue::from(record.lon));
            properties.insert(
                "Country".to_string(),
                JsonValue::from(record.country.as_str()),
            );
            properties.insert(
                "Dataset".to_string(),
                JsonValue::from(record.dataset.as_str()),
            );

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![record.lon, record.lat]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// One polygon feature per footprint with `ID` as its only property.
///
/// When `epsg` is given the collection carries a [`named_crs_member`].
#[must_use]
pub fn footprints_collection(footprints: &[Footprint], epsg: Option<u32>) -> FeatureCollection {
    let features = footprints
        .iter()
        .map(|footprint| {
            let mut properties = JsonObject::new();
            properties.insert("ID".to_string(), JsonValue::from(footprint.id));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::from(&footprint.polygon))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: epsg.map(named_crs_member),
    }
}

/// Serialize a feature collection.
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub fn write_geojson<W: Write>(
    writer: &mut W,
    collection: &FeatureCollection,
    options: &GeoJsonWriterOptions,
) -> serde_json::Result<()> {
    if options.pretty {
        serde_json::to_writer_pretty(&mut *writer, collection)
    } else {
        serde_json::to_writer(&mut *writer, collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishnet_core_common::Record;
    use geo_types::{LineString, Polygon};

    fn sampled(id: u64, lat: f64, lon: f64) -> SampledRecord {
        SampledRecord {
            id,
            record: Record {
                tid: format!("T{id}"),
                category: "Weirs".to_string(),
                lat,
                lon,
                country: "France".to_string(),
                dataset: "AMBER".to_string(),
                status: None,
            },
        }
    }

    fn square(half: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![
                (-half, -half),
                (-half, half),
                (half, half),
                (half, -half),
                (-half, -half),
            ]),
            vec![],
        )
    }

    #[test]
    fn points_use_lon_lat_order() {
        let collection = points_collection(&[sampled(1, 45.5, 4.25)]);
        assert_eq!(collection.features.len(), 1);

        let geometry = collection.features[0].geometry.as_ref().unwrap();
        assert_eq!(geometry.value, Value::Point(vec![4.25, 45.5]));
    }

    #[test]
    fn points_carry_table_columns() {
        let collection = points_collection(&[sampled(3, 45.5, 4.25)]);
        let properties = collection.features[0].properties.as_ref().unwrap();

        assert_eq!(properties["ID"], json!(3));
        assert_eq!(properties["TID"], json!("T3"));
        assert_eq!(properties["Type"], json!("Weirs"));
        assert_eq!(properties["Dataset"], json!("AMBER"));
        assert_eq!(properties["Country"], json!("France"));
        assert_eq!(properties.len(), 7);
    }

    #[test]
    fn footprints_carry_only_id() {
        let footprints = vec![Footprint {
            id: 9,
            polygon: square(10.0),
        }];
        let collection = footprints_collection(&footprints, Some(3857));
        let properties = collection.features[0].properties.as_ref().unwrap();

        assert_eq!(properties.len(), 1);
        assert_eq!(properties["ID"], json!(9));

        let Value::Polygon(rings) = &collection.features[0].geometry.as_ref().unwrap().value
        else {
            panic!("expected polygon geometry");
        };
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 5);
        assert_eq!(rings[0][0], vec![-10.0, -10.0]);
        assert_eq!(rings[0][2], vec![10.0, 10.0]);
    }

    #[test]
    fn crs_member_is_attached() {
        let collection = footprints_collection(&[], Some(3857));
        let members = collection.foreign_members.as_ref().unwrap();
        assert_eq!(
            members["crs"]["properties"]["name"],
            json!("urn:ogc:def:crs:EPSG::3857")
        );

        let collection = footprints_collection(&[], None);
        assert!(collection.foreign_members.is_none());
    }

    #[test]
    fn write_compact_and_pretty() {
        let collection = points_collection(&[sampled(1, 10.0, 20.0)]);

        let mut compact = Vec::new();
        write_geojson(&mut compact, &collection, &GeoJsonWriterOptions::default()).unwrap();
        let compact = String::from_utf8(compact).unwrap();
        assert!(!compact.contains('\n'));
        assert!(compact.contains("\"FeatureCollection\""));

        let mut pretty = Vec::new();
        write_geojson(
            &mut pretty,
            &collection,
            &GeoJsonWriterOptions::new().with_pretty(true),
        )
        .unwrap();
        let pretty = String::from_utf8(pretty).unwrap();
        assert!(pretty.contains('\n'));

        let parsed: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(parsed["features"][0]["geometry"]["type"], json!("Point"));
    }
}

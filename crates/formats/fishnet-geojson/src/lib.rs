//! `GeoJSON` output for `fishnet`: sample points in geographic coordinates and
//! fishnet footprints in Web Mercator.

pub mod file_format;
pub mod writer;

pub use file_format::GeoJsonFormat;
pub use writer::{
    GeoJsonWriterOptions, footprints_collection, named_crs_member, points_collection,
    write_geojson,
};

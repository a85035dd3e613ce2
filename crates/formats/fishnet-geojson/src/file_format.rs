//! [`FeatureSink`] implementation writing `GeoJSON` files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use fishnet_core_common::{FeatureSink, Footprint, SampledRecord};
use geojson::FeatureCollection;

use crate::writer::{GeoJsonWriterOptions, footprints_collection, points_collection, write_geojson};

/// EPSG code of the projected footprint geometries.
const FOOTPRINT_EPSG: u32 = 3857;

/// `GeoJSON` writer for sample points and fishnet footprints.
#[derive(Debug, Clone, Default)]
pub struct GeoJsonFormat {
    options: GeoJsonWriterOptions,
}

impl GeoJsonFormat {
    #[must_use]
    pub fn new(options: GeoJsonWriterOptions) -> Self {
        Self { options }
    }

    fn write_collection(&self, path: &Path, collection: &FeatureCollection) -> Result<()> {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_geojson(&mut writer, collection, &self.options)?;
        writer.flush()?;
        log::debug!(
            "Wrote {} feature(s) to {}",
            collection.features.len(),
            path.display()
        );
        Ok(())
    }
}

impl FeatureSink for GeoJsonFormat {
    fn format_name(&self) -> &'static str {
        "GeoJSON"
    }

    fn file_extension(&self) -> &'static str {
        "geojson"
    }

    fn write_points(&self, path: &Path, rows: &[SampledRecord]) -> Result<()> {
        self.write_collection(path, &points_collection(rows))
    }

    fn write_footprints(&self, path: &Path, footprints: &[Footprint]) -> Result<()> {
        self.write_collection(path, &footprints_collection(footprints, Some(FOOTPRINT_EPSG)))
    }
}

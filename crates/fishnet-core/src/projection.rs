//! Spherical Web Mercator projection and square footprints.
//!
//! Geographic coordinates (EPSG:4326) are projected onto EPSG:3857 and buffered
//! into axis-aligned squares whose side is twice the configured half-size.

use fishnet_core_common::{Footprint, SampledRecord};
use geo_types::{Coord, LineString, Polygon, coord};

/// Sphere radius used by EPSG:3857, in metres.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude at which Web Mercator becomes a square world.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;

/// Project a longitude/latitude pair in degrees to Web Mercator metres.
///
/// Latitudes beyond the Web Mercator limits are clamped.
///
/// # Examples
///
/// ```
/// use fishnet_core::projection::to_web_mercator;
///
/// let origin = to_web_mercator(0.0, 0.0);
/// assert_eq!((origin.x, origin.y), (0.0, 0.0));
///
/// let antimeridian = to_web_mercator(180.0, 0.0);
/// assert!((antimeridian.x - 20_037_508.342_789_244).abs() < 1e-6);
/// ```
#[must_use]
pub fn to_web_mercator(lon: f64, lat: f64) -> Coord<f64> {
    let lat = lat.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
    coord! {
        x: EARTH_RADIUS * lon.to_radians(),
        y: EARTH_RADIUS * lat.to_radians().sin().atanh(),
    }
}

/// Axis-aligned square of side `2 * half_size` centred on `center`.
///
/// The ring runs `(minx, miny) -> (minx, maxy) -> (maxx, maxy) -> (maxx, miny)`
/// and is closed back to its start.
#[must_use]
pub fn square_footprint(center: Coord<f64>, half_size: f64) -> Polygon<f64> {
    let (minx, maxx) = (center.x - half_size, center.x + half_size);
    let (miny, maxy) = (center.y - half_size, center.y + half_size);
    Polygon::new(
        LineString::from(vec![
            (minx, miny),
            (minx, maxy),
            (maxx, maxy),
            (maxx, miny),
            (minx, miny),
        ]),
        vec![],
    )
}

/// Project every row and buffer it into a footprint carrying the row's ID.
#[must_use]
pub fn project_and_buffer(rows: &[SampledRecord], half_size: f64) -> Vec<Footprint> {
    rows.iter()
        .map(|row| Footprint {
            id: row.id,
            polygon: square_footprint(
                to_web_mercator(row.record.lon, row.record.lat),
                half_size,
            ),
        })
        .collect()
}

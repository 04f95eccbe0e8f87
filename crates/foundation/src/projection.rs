//! Spherical Web Mercator (EPSG:3857), as used by XYZ tile providers.

use crate::geo::LatLng;

/// Latitude limit of the square Web Mercator world.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Projects a position to normalized world coordinates in `[0, 1]²`
/// (x grows east, y grows south).
pub fn project_normalized(p: LatLng) -> (f64, f64) {
    let lat = p.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let x = (p.lng + 180.0) / 360.0;
    let y = 0.5 - (lat.tan() + 1.0 / lat.cos()).ln() / (2.0 * std::f64::consts::PI);
    (x, y)
}

use serde::{Deserialize, Serialize};

/// Geographic position in degrees (WGS84).
///
/// Field order follows the mapping convention `[lat, lng]`, which is the
/// reverse of GeoJSON's `[lon, lat]` coordinate order.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a position from GeoJSON's `[lon, lat]` order.
    pub const fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { lat, lng: lon }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Wraps longitude into `[-180, 180)`.
    pub fn wrapped(self) -> Self {
        let lng = (self.lng + 180.0).rem_euclid(360.0) - 180.0;
        Self { lat: self.lat, lng }
    }
}

/// Axis-aligned lat/lng box.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a LatLng>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut out = Self::new(first, first);
        for p in iter {
            out.extend(*p);
        }
        Some(out)
    }

    pub fn extend(&mut self, p: LatLng) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lng = self.south_west.lng.min(p.lng);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lng = self.north_east.lng.max(p.lng);
    }
}

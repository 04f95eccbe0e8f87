//! Typed view over the USGS earthquake summary feed.
//!
//! Each feature is a `Point` whose coordinates are `[lon, lat, depth_km]`,
//! with `properties.mag` and `properties.place`.

use foundation::LatLng;
use tracing::debug;

use crate::geojson::{Feature, FeatureCollection, GeoJsonError, Geometry, SkippedFeature};

pub const USGS_ALL_WEEK_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeFeature {
    pub id: Option<String>,
    pub position: LatLng,
    pub depth_km: Option<f64>,
    pub magnitude: Option<f64>,
    pub place: Option<String>,
    /// Origin time in milliseconds since the Unix epoch.
    pub time_ms: Option<i64>,
    pub url: Option<String>,
    pub title: Option<String>,
}

impl EarthquakeFeature {
    pub fn from_feature(feature: &Feature) -> Result<Self, String> {
        let point = match &feature.geometry {
            Some(Geometry::Point(p)) => *p,
            Some(other) => return Err(format!("expected Point, got {}", other.type_name())),
            None => return Err("missing geometry".to_string()),
        };
        let position = LatLng::from_lon_lat(point.lon_deg, point.lat_deg);
        if !position.is_valid() {
            return Err(format!(
                "position out of range: lat {}, lon {}",
                position.lat, position.lng
            ));
        }

        Ok(Self {
            id: feature.id.clone(),
            position,
            depth_km: point.z,
            magnitude: feature.property_f64("mag"),
            place: feature.property_str("place").map(str::to_string),
            time_ms: feature.property_i64("time"),
            url: feature.property_str("url").map(str::to_string),
            title: feature.property_str("title").map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EarthquakeFeed {
    pub title: Option<String>,
    /// Generation time of the feed in milliseconds since the Unix epoch.
    pub generated_ms: Option<i64>,
    pub quakes: Vec<EarthquakeFeature>,
    pub skipped: Vec<SkippedFeature>,
}

impl EarthquakeFeed {
    pub fn from_geojson_str(payload: &str) -> Result<Self, GeoJsonError> {
        let collection = FeatureCollection::from_geojson_str(payload)?;
        Ok(Self::from_collection(&collection))
    }

    /// Features that are not valid earthquake points are skipped, not fatal.
    pub fn from_collection(collection: &FeatureCollection) -> Self {
        let mut out = Self::default();
        if let Some(meta) = &collection.metadata {
            out.title = meta.get("title").and_then(|v| v.as_str()).map(str::to_string);
            out.generated_ms = meta.get("generated").and_then(|v| v.as_i64());
        }

        out.skipped = collection.skipped.clone();
        for feature in &collection.features {
            match EarthquakeFeature::from_feature(feature) {
                Ok(q) => out.quakes.push(q),
                Err(reason) => {
                    debug!(index = feature.index, %reason, "skipping earthquake feature");
                    out.skipped.push(SkippedFeature {
                        index: feature.index,
                        reason,
                    });
                }
            }
        }
        out.skipped.sort_by_key(|s| s.index);
        out
    }

    pub fn len(&self) -> usize {
        self.quakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quakes.is_empty()
    }

    /// Smallest and largest magnitude present, ignoring features without one.
    pub fn magnitude_range(&self) -> Option<(f64, f64)> {
        self.quakes
            .iter()
            .filter_map(|q| q.magnitude)
            .fold(None, |acc, m| match acc {
                None => Some((m, m)),
                Some((lo, hi)) => Some((lo.min(m), hi.max(m))),
            })
    }
}

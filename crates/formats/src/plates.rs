//! Typed view over the PB2002 plate boundary dataset.
//!
//! Each feature is a `LineString` (occasionally a `MultiLineString`) with
//! `Name`, `PlateA`, `PlateB` and `Type` properties.

use foundation::LatLng;
use tracing::debug;

use crate::geojson::{FeatureCollection, GeoJsonError, GeoPoint, Geometry, SkippedFeature};

pub const PB2002_BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

#[derive(Debug, Clone, PartialEq)]
pub struct PlateBoundaryFeature {
    pub name: Option<String>,
    pub plate_a: Option<String>,
    pub plate_b: Option<String>,
    /// Boundary class as labelled in the dataset (e.g. "subduction").
    pub kind: Option<String>,
    pub paths: Vec<Vec<LatLng>>,
}

impl PlateBoundaryFeature {
    pub fn vertex_count(&self) -> usize {
        self.paths.iter().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlateBoundaryFeed {
    pub boundaries: Vec<PlateBoundaryFeature>,
    pub skipped: Vec<SkippedFeature>,
}

impl PlateBoundaryFeed {
    pub fn from_geojson_str(payload: &str) -> Result<Self, GeoJsonError> {
        let collection = FeatureCollection::from_geojson_str(payload)?;
        Ok(Self::from_collection(&collection))
    }

    pub fn from_collection(collection: &FeatureCollection) -> Self {
        let mut out = Self {
            skipped: collection.skipped.clone(),
            ..Self::default()
        };
        for feature in &collection.features {
            let index = feature.index;
            let paths = match &feature.geometry {
                Some(Geometry::LineString(pts)) => vec![to_path(pts)],
                Some(Geometry::MultiLineString(lines)) => {
                    lines.iter().map(|l| to_path(l)).collect()
                }
                Some(other) => {
                    let reason = format!("expected line geometry, got {}", other.type_name());
                    debug!(index, %reason, "skipping plate boundary feature");
                    out.skipped.push(SkippedFeature { index, reason });
                    continue;
                }
                None => {
                    out.skipped.push(SkippedFeature {
                        index,
                        reason: "missing geometry".to_string(),
                    });
                    continue;
                }
            };

            out.boundaries.push(PlateBoundaryFeature {
                name: feature.property_str("Name").map(str::to_string),
                plate_a: feature.property_str("PlateA").map(str::to_string),
                plate_b: feature.property_str("PlateB").map(str::to_string),
                kind: feature.property_str("Type").map(str::to_string),
                paths,
            });
        }
        out.skipped.sort_by_key(|s| s.index);
        out
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }
}

fn to_path(points: &[GeoPoint]) -> Vec<LatLng> {
    points
        .iter()
        .map(|p| LatLng::from_lon_lat(p.lon_deg, p.lat_deg))
        .collect()
}

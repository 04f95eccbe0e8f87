//! Reports over saved feed snapshots, shared by the `quakemap` binary.

use std::collections::BTreeMap;

use formats::{EarthquakeFeed, PlateBoundaryFeed};
use foundation::{LatLngBounds, TileCoord};
use layers::symbology::{DEPTH_TIERS, MarkerStyle};
use layers::vector::EarthquakeLayer;
use runtime::MapConfig;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct QuakeSummary {
    pub title: Option<String>,
    pub markers: usize,
    pub skipped: usize,
    pub tier_counts: [usize; DEPTH_TIERS.len()],
    pub magnitude_range: Option<(f64, f64)>,
    pub extent: Option<LatLngBounds>,
}

pub fn summarize_quakes(feed: &EarthquakeFeed) -> QuakeSummary {
    let layer = EarthquakeLayer::from_feed(0, feed);
    QuakeSummary {
        title: feed.title.clone(),
        markers: layer.markers.len(),
        skipped: feed.skipped.len(),
        tier_counts: layer.tier_counts(),
        magnitude_range: feed.magnitude_range(),
        extent: layer.bounds(),
    }
}

impl std::fmt::Display for QuakeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "{title}")?;
        }
        writeln!(f, "markers: {} (skipped {})", self.markers, self.skipped)?;
        for (i, (tier, count)) in DEPTH_TIERS.iter().zip(self.tier_counts).enumerate() {
            let label = match DEPTH_TIERS.get(i + 1) {
                Some(next) => format!("{}-{} km", tier.lower_km, next.lower_km),
                None => format!("{}+ km", tier.lower_km),
            };
            writeln!(f, "  {} {label:>10}: {count}", tier.color)?;
        }
        if let Some(b) = &self.extent {
            writeln!(
                f,
                "extent: lat {} to {}, lng {} to {}",
                b.south_west.lat, b.north_east.lat, b.south_west.lng, b.north_east.lng
            )?;
        }
        match self.magnitude_range {
            Some((lo, hi)) => write!(f, "magnitude: {lo} to {hi}"),
            None => write!(f, "magnitude: n/a"),
        }
    }
}

/// One styled marker as written by `quakemap style`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledQuake {
    pub id: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub style: MarkerStyle,
    pub popup: String,
}

pub fn styled_quakes(feed: &EarthquakeFeed) -> Vec<StyledQuake> {
    EarthquakeLayer::from_feed(0, feed)
        .markers
        .into_iter()
        .map(|m| StyledQuake {
            id: m.id,
            lat: m.position.lat,
            lng: m.position.lng,
            style: m.style,
            popup: m.popup_html,
        })
        .collect()
}

/// Boundary count per `Type` label; unlabelled boundaries count as "unspecified".
pub fn plate_kinds(feed: &PlateBoundaryFeed) -> BTreeMap<String, usize> {
    let mut out = BTreeMap::new();
    for b in &feed.boundaries {
        let kind = match b.kind.as_deref() {
            Some(k) if !k.trim().is_empty() => k.to_string(),
            _ => "unspecified".to_string(),
        };
        *out.entry(kind).or_insert(0) += 1;
    }
    out
}

/// `(layer name, url)` of the tile under the viewport centre for each base layer.
pub fn center_tile_urls(config: &MapConfig) -> Vec<(String, String)> {
    let coord = TileCoord::containing(config.center, config.zoom);
    config
        .base_layers
        .iter()
        .map(|l| (l.name.clone(), l.source.tile_url(coord)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundation::LatLng;
    use pretty_assertions::assert_eq;

    const QUAKES: &str = include_str!("../../formats/tests/fixtures/all_week_sample.geojson");
    const PLATES: &str = include_str!("../../formats/tests/fixtures/pb2002_sample.json");

    #[test]
    fn summary_counts_tiers() {
        let feed = EarthquakeFeed::from_geojson_str(QUAKES).unwrap();
        let s = summarize_quakes(&feed);
        assert_eq!(s.markers, 6);
        assert_eq!(s.skipped, 1);
        assert_eq!(s.tier_counts, [2, 1, 2, 1]);
        let extent = s.extent.expect("extent");
        assert_eq!(extent.south_west, LatLng::new(-29.4, -177.9));
        assert_eq!(extent.north_east, LatLng::new(60.95, -117.56));
        let text = s.to_string();
        assert!(text.starts_with("USGS All Earthquakes, Past Week\n"));
        assert!(text.contains("#FF0000"));
        assert!(text.contains("extent: lat -29.4 to 60.95, lng -177.9 to -117.56\n"));
        assert!(text.ends_with("magnitude: -0.6 to 4.7"));
    }

    #[test]
    fn empty_feed_has_no_extent() {
        let s = summarize_quakes(&EarthquakeFeed::default());
        assert_eq!(s.markers, 0);
        assert_eq!(s.extent, None);
        let text = s.to_string();
        assert!(!text.contains("extent"));
        assert!(text.ends_with("magnitude: n/a"));
    }

    #[test]
    fn styled_output_uses_library_names() {
        let feed = EarthquakeFeed::from_geojson_str(QUAKES).unwrap();
        let styled = styled_quakes(&feed);
        let v = serde_json::to_value(&styled[1]).unwrap();
        assert_eq!(v["style"]["fillColor"], "#FFA500");
        assert_eq!(v["style"]["radius"], 14.0);
        assert_eq!(v["id"], "ak025001");
    }

    #[test]
    fn plate_kinds_group_blank_labels() {
        let feed = PlateBoundaryFeed::from_geojson_str(PLATES).unwrap();
        let kinds = plate_kinds(&feed);
        assert_eq!(kinds.get("unspecified"), Some(&2));
        assert_eq!(kinds.get("subduction"), Some(&1));
    }

    #[test]
    fn center_tiles_for_stock_config() {
        let urls = center_tile_urls(&MapConfig::default());
        assert_eq!(
            urls,
            vec![
                (
                    "Basemap".to_string(),
                    "https://c.tile.openstreetmap.org/5/5/12.png".to_string()
                ),
                (
                    "Street".to_string(),
                    "https://c.tile.thunderforest.com/cycle/5/5/12.png".to_string()
                ),
            ]
        );
    }
}

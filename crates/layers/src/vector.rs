use formats::{EarthquakeFeature, EarthquakeFeed, PlateBoundaryFeature, PlateBoundaryFeed};
use foundation::{LatLng, LatLngBounds};
use serde::Serialize;

use crate::layer::{Layer, LayerId};
use crate::popup::popup_html;
use crate::symbology::{DEPTH_TIERS, MarkerStyle, PlateLineStyle, depth_tier};

/// One styled circle marker, ready to hand to the mapping library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeMarker {
    pub id: Option<String>,
    pub position: LatLng,
    pub style: MarkerStyle,
    pub popup_html: String,
    /// Index into the depth tiers, kept for summaries.
    #[serde(skip)]
    pub tier: usize,
}

impl EarthquakeMarker {
    pub fn from_quake(quake: &EarthquakeFeature) -> Self {
        Self {
            id: quake.id.clone(),
            position: quake.position,
            style: MarkerStyle::for_quake(quake.depth_km, quake.magnitude),
            popup_html: popup_html(quake.magnitude, quake.place.as_deref()),
            tier: depth_tier(quake.depth_km.unwrap_or(f64::NAN)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeLayer {
    id: LayerId,
    pub markers: Vec<EarthquakeMarker>,
}

impl EarthquakeLayer {
    pub fn new(id: u64) -> Self {
        Self {
            id: LayerId(id),
            markers: Vec::new(),
        }
    }

    pub fn from_feed(id: u64, feed: &EarthquakeFeed) -> Self {
        Self {
            id: LayerId(id),
            markers: feed.quakes.iter().map(EarthquakeMarker::from_quake).collect(),
        }
    }

    /// Marker counts per depth tier, shallowest first.
    pub fn tier_counts(&self) -> [usize; DEPTH_TIERS.len()] {
        let mut counts = [0usize; DEPTH_TIERS.len()];
        for m in &self.markers {
            counts[m.tier] += 1;
        }
        counts
    }

    /// Smallest box around every marker; `None` while the layer is empty.
    pub fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(self.markers.iter().map(|m| &m.position))
    }
}

impl Layer for EarthquakeLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn name(&self) -> &str {
        "Earthquakes"
    }
}

/// Plate boundary polylines. Styling is left to the mapping library unless
/// a [`PlateLineStyle`] is configured.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateBoundaryLayer {
    id: LayerId,
    pub style: PlateLineStyle,
    pub boundaries: Vec<PlateBoundaryFeature>,
}

impl PlateBoundaryLayer {
    pub fn new(id: u64, style: PlateLineStyle) -> Self {
        Self {
            id: LayerId(id),
            style,
            boundaries: Vec::new(),
        }
    }

    pub fn from_feed(id: u64, style: PlateLineStyle, feed: &PlateBoundaryFeed) -> Self {
        Self {
            id: LayerId(id),
            style,
            boundaries: feed.boundaries.clone(),
        }
    }

    /// Every path of every boundary, in feed order.
    pub fn paths(&self) -> impl Iterator<Item = &[LatLng]> {
        self.boundaries
            .iter()
            .flat_map(|b| b.paths.iter().map(Vec::as_slice))
    }
}

impl Layer for PlateBoundaryLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn name(&self) -> &str {
        "Tectonic Plates"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbology::Color;
    use formats::EarthquakeFeed;

    const FEED: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","id":"a","properties":{"mag":2,"place":"Near A"},
         "geometry":{"type":"Point","coordinates":[-122.0,37.0,5]}},
        {"type":"Feature","id":"b","properties":{"mag":3.5,"place":"Near B"},
         "geometry":{"type":"Point","coordinates":[-150.0,61.0,45]}},
        {"type":"Feature","id":"c","properties":{"mag":5.1,"place":"Near C"},
         "geometry":{"type":"Point","coordinates":[140.0,35.0,120]}}
    ]}"#;

    #[test]
    fn builds_one_marker_per_quake() {
        let feed = EarthquakeFeed::from_geojson_str(FEED).unwrap();
        let layer = EarthquakeLayer::from_feed(1, &feed);
        assert_eq!(layer.markers.len(), 3);
        assert_eq!(layer.markers[0].style.fill_color, Color::GREEN);
        assert_eq!(layer.markers[0].style.radius, 8.0);
        assert_eq!(layer.markers[0].popup_html, "Magnitude: 2<br>Location: Near A");
        assert_eq!(layer.markers[1].style.fill_color, Color::ORANGE);
        assert_eq!(layer.markers[1].style.radius, 14.0);
        assert_eq!(layer.tier_counts(), [1, 0, 1, 1]);
    }

    #[test]
    fn bounds_span_all_markers() {
        let feed = EarthquakeFeed::from_geojson_str(FEED).unwrap();
        let b = EarthquakeLayer::from_feed(1, &feed).bounds().unwrap();
        assert_eq!(b.south_west, LatLng::new(35.0, -150.0));
        assert_eq!(b.north_east, LatLng::new(61.0, 140.0));
        assert!(EarthquakeLayer::new(2).bounds().is_none());
    }

    #[test]
    fn plate_paths_flatten_multilines() {
        let feed = formats::PlateBoundaryFeed::from_geojson_str(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{"Name":"X"},
                 "geometry":{"type":"MultiLineString","coordinates":[[[0,0],[1,1]],[[2,2],[3,3]]]}},
                {"type":"Feature","properties":{"Name":"Y"},
                 "geometry":{"type":"LineString","coordinates":[[4,4],[5,5]]}}
            ]}"#,
        )
        .unwrap();
        let layer = PlateBoundaryLayer::from_feed(2, PlateLineStyle::default(), &feed);
        assert_eq!(layer.paths().count(), 3);
        assert_eq!(layer.name(), "Tectonic Plates");
    }
}

use formats::{EarthquakeFeed, FeatureCollection, PlateBoundaryFeed};
use pretty_assertions::assert_eq;

const QUAKES: &str = include_str!("fixtures/all_week_sample.geojson");
const PLATES: &str = include_str!("fixtures/pb2002_sample.json");

#[test]
fn reads_usgs_week_sample() {
    let feed = EarthquakeFeed::from_geojson_str(QUAKES).expect("parse feed");

    assert_eq!(feed.title.as_deref(), Some("USGS All Earthquakes, Past Week"));
    assert_eq!(feed.generated_ms, Some(1_745_000_000_000));
    assert_eq!(feed.len(), 6);
    assert_eq!(feed.skipped.len(), 1);
    assert_eq!(feed.skipped[0].index, 6);

    let first = &feed.quakes[0];
    assert_eq!(first.id.as_deref(), Some("nc75160001"));
    assert_eq!(first.depth_km, Some(5.0));
    assert_eq!(first.magnitude, Some(2.0));
    assert_eq!(first.place.as_deref(), Some("5 km NW of The Geysers, CA"));

    let unknown = feed
        .quakes
        .iter()
        .find(|q| q.id.as_deref() == Some("nc75160002"))
        .expect("null magnitude quake kept");
    assert_eq!(unknown.magnitude, None);

    assert_eq!(feed.magnitude_range(), Some((-0.6, 4.7)));
}

#[test]
fn raw_collection_keeps_metadata() {
    let fc = FeatureCollection::from_geojson_str(QUAKES).expect("parse");
    let meta = fc.metadata.expect("metadata");
    assert_eq!(meta.get("count").and_then(|v| v.as_u64()), Some(7));
    assert_eq!(fc.features.len(), 7);
}

#[test]
fn reads_pb2002_sample() {
    let feed = PlateBoundaryFeed::from_geojson_str(PLATES).expect("parse plates");
    assert_eq!(feed.len(), 3);
    assert!(feed.skipped.is_empty());

    let names: Vec<_> = feed
        .boundaries
        .iter()
        .map(|b| b.name.as_deref().unwrap_or(""))
        .collect();
    assert_eq!(names, vec!["AF-AN", "NA-PA", "PA\\KE"]);

    let subduction = &feed.boundaries[2];
    assert_eq!(subduction.kind.as_deref(), Some("subduction"));
    assert_eq!(subduction.paths.len(), 2);
    assert_eq!(subduction.vertex_count(), 5);
    assert_eq!(subduction.paths[0][0].lat, -29.0);
    assert_eq!(subduction.paths[0][0].lng, -177.0);
}

#[test]
fn earthquake_feed_rejects_plain_feature() {
    let err = EarthquakeFeed::from_geojson_str(r#"{"type":"Feature","geometry":null}"#)
        .expect_err("not a collection");
    assert_eq!(err.to_string(), "expected GeoJSON FeatureCollection");
}

const PARTLY_BROKEN: &str = r#"{"type":"FeatureCollection","features":[
    {"type":"Feature","id":"ok","properties":{"mag":2.5,"place":"Fine"},
     "geometry":{"type":"Point","coordinates":[-122.4,37.8,7]}},
    {"type":"Feature","id":"short","properties":{"mag":1.0},
     "geometry":{"type":"Point","coordinates":[-122.4]}},
    {"type":"Feature","id":"bare","properties":{"mag":1.1}}
]}"#;

#[test]
fn malformed_features_are_skipped_and_counted() {
    let feed = EarthquakeFeed::from_geojson_str(PARTLY_BROKEN).expect("parse feed");

    assert_eq!(feed.len(), 1);
    assert_eq!(feed.quakes[0].id.as_deref(), Some("ok"));
    let skipped: Vec<_> = feed
        .skipped
        .iter()
        .map(|s| (s.index, s.reason.as_str()))
        .collect();
    assert_eq!(
        skipped,
        vec![
            (1, "position must have [lon, lat]"),
            (2, "missing geometry"),
        ]
    );
}

#[test]
fn malformed_plate_lines_are_skipped() {
    let payload = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"Name":"bad"},
         "geometry":{"type":"LineString","coordinates":[[0,0],["x",1]]}},
        {"type":"Feature","properties":{"Name":"AF-AN"},
         "geometry":{"type":"LineString","coordinates":[[0,0],[1,1]]}}
    ]}"#;
    let feed = PlateBoundaryFeed::from_geojson_str(payload).expect("parse plates");

    assert_eq!(feed.len(), 1);
    assert_eq!(feed.boundaries[0].name.as_deref(), Some("AF-AN"));
    assert_eq!(feed.skipped.len(), 1);
    assert_eq!(feed.skipped[0].index, 0);
    assert_eq!(feed.skipped[0].reason, "lon must be a number");
}

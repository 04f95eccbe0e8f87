//! The four steps that put the map together.
//!
//! `initialize_map` runs once at load. The feed builders run when their
//! fetch settles and accept either the parsed feed or the error, so a failed
//! request still leaves a consistent context behind.

use formats::{EarthquakeFeed, PlateBoundaryFeed};
use layers::Layer;
use layers::control::{ControlEntry, LayerControl};
use layers::legend::Legend;
use layers::raster::TileLayer;
use layers::vector::{EarthquakeLayer, PlateBoundaryLayer};
use tracing::{info, warn};

use crate::config::{ConfigError, MapConfig};
use crate::context::{MapContext, StatusMessage};
use crate::event_bus::EventBus;
use crate::feed::{Feed, FeedError, FeedKind, FeedStateError};

/// Builds the viewport, base layers, the two empty overlay groups and the
/// layer control.
pub fn initialize_map(config: MapConfig) -> Result<MapContext, ConfigError> {
    config.validate()?;

    let mut next_id = 1u64;
    let mut base_layers = Vec::with_capacity(config.base_layers.len());
    for base in &config.base_layers {
        base_layers.push(TileLayer::new(next_id, base.name.clone(), base.source.clone()));
        next_id += 1;
    }
    let earthquakes = EarthquakeLayer::new(next_id);
    let plates = PlateBoundaryLayer::new(next_id + 1, config.plate_style.clone());

    let mut control = LayerControl::new(
        base_layers.iter().map(|l| control_entry(l)).collect(),
        vec![control_entry(&earthquakes), control_entry(&plates)],
    )
    .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    control.collapsed = config.collapse_layer_control;

    let mut events = EventBus::new();
    events.emit(
        "init",
        format!(
            "map centred on ({}, {}) at zoom {} with {} base layers",
            config.center.lat,
            config.center.lng,
            config.zoom,
            base_layers.len()
        ),
    );
    info!(
        lat = config.center.lat,
        lng = config.center.lng,
        zoom = config.zoom,
        "map initialised"
    );

    Ok(MapContext {
        center: config.center,
        zoom: config.zoom,
        quake_feed: Feed::new(FeedKind::Earthquakes, config.earthquake_feed_url.clone()),
        plate_feed: Feed::new(FeedKind::TectonicPlates, config.plate_feed_url.clone()),
        config,
        base_layers,
        earthquakes,
        plates,
        control,
        legend: None,
        status: Vec::new(),
        events,
    })
}

fn control_entry(layer: &dyn Layer) -> ControlEntry {
    ControlEntry {
        id: layer.id(),
        name: layer.name().to_string(),
    }
}

/// Marks a feed as in flight and returns the URL to request.
pub fn begin_feed(ctx: &mut MapContext, kind: FeedKind) -> Result<String, FeedStateError> {
    let feed = ctx.feed_mut(kind);
    feed.begin()?;
    let url = feed.url.clone();
    ctx.events.emit("feed", format!("{} loading", kind.label()));
    Ok(url)
}

pub fn parse_earthquake_payload(payload: &str) -> Result<EarthquakeFeed, FeedError> {
    Ok(EarthquakeFeed::from_geojson_str(payload)?)
}

pub fn parse_plate_payload(payload: &str) -> Result<PlateBoundaryFeed, FeedError> {
    Ok(PlateBoundaryFeed::from_geojson_str(payload)?)
}

/// Populates the earthquakes overlay, or records the failure. Either way
/// the legend is attached afterwards.
///
/// Returns the number of markers added.
pub fn build_earthquake_layer(
    ctx: &mut MapContext,
    outcome: Result<EarthquakeFeed, FeedError>,
) -> Result<usize, FeedStateError> {
    let added = match outcome {
        Ok(feed) => {
            let layer = EarthquakeLayer::from_feed(ctx.earthquakes.id().0, &feed);
            let count = layer.markers.len();
            if !feed.skipped.is_empty() {
                warn!(skipped = feed.skipped.len(), "earthquake features skipped");
            }
            ctx.quake_feed.finish_loaded(count, feed.skipped.len())?;
            ctx.earthquakes = layer;
            ctx.events
                .emit("feed", format!("earthquake feed loaded: {count} markers"));
            count
        }
        Err(error) => {
            record_failure(ctx, FeedKind::Earthquakes, error)?;
            0
        }
    };
    attach_legend(ctx);
    Ok(added)
}

/// Adds the depth legend once; later calls are no-ops.
pub fn attach_legend(ctx: &mut MapContext) -> &Legend {
    if ctx.legend.is_none() {
        let legend = Legend::depth();
        ctx.events.emit(
            "legend",
            format!(
                "legend attached at {} with {} entries",
                legend.position.as_str(),
                legend.entries.len()
            ),
        );
        ctx.legend = Some(legend);
    }
    ctx.legend.get_or_insert_with(Legend::depth)
}

/// Populates the tectonic plates overlay, or records the failure.
///
/// Returns the number of boundaries added.
pub fn build_plate_layer(
    ctx: &mut MapContext,
    outcome: Result<PlateBoundaryFeed, FeedError>,
) -> Result<usize, FeedStateError> {
    match outcome {
        Ok(feed) => {
            let layer =
                PlateBoundaryLayer::from_feed(ctx.plates.id().0, ctx.plates.style.clone(), &feed);
            let count = layer.boundaries.len();
            ctx.plate_feed.finish_loaded(count, feed.skipped.len())?;
            ctx.plates = layer;
            ctx.events
                .emit("feed", format!("tectonic plate feed loaded: {count} boundaries"));
            Ok(count)
        }
        Err(error) => {
            record_failure(ctx, FeedKind::TectonicPlates, error)?;
            Ok(0)
        }
    }
}

fn record_failure(
    ctx: &mut MapContext,
    kind: FeedKind,
    error: FeedError,
) -> Result<(), FeedStateError> {
    let text = format!("{} unavailable: {error}", capitalize(kind.label()));
    ctx.feed_mut(kind).finish_failed(error)?;
    ctx.events.emit("feed", text.clone());
    ctx.status.push(StatusMessage { feed: kind, text });
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

use foundation::LatLng;
use layers::control::{ControlError, LayerControl};
use layers::legend::Legend;
use layers::raster::TileLayer;
use layers::vector::{EarthquakeLayer, PlateBoundaryLayer};
use layers::Layer;

use crate::config::MapConfig;
use crate::event_bus::EventBus;
use crate::feed::{Feed, FeedKind};

/// A user-visible notice, e.g. a feed that failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub feed: FeedKind,
    pub text: String,
}

/// Owns the whole map: viewport, layers, control, legend and feed states.
///
/// Builders take `&mut MapContext`; nothing lives in globals.
#[derive(Debug)]
pub struct MapContext {
    pub config: MapConfig,
    pub center: LatLng,
    pub zoom: u8,
    pub(crate) base_layers: Vec<TileLayer>,
    pub(crate) earthquakes: EarthquakeLayer,
    pub(crate) plates: PlateBoundaryLayer,
    pub(crate) control: LayerControl,
    pub(crate) legend: Option<Legend>,
    pub(crate) quake_feed: Feed,
    pub(crate) plate_feed: Feed,
    pub(crate) status: Vec<StatusMessage>,
    pub events: EventBus,
}

impl MapContext {
    pub fn base_layers(&self) -> &[TileLayer] {
        &self.base_layers
    }

    pub fn active_base_layer(&self) -> Option<&TileLayer> {
        let id = self.control.active_base().id;
        self.base_layers.iter().find(|l| l.id() == id)
    }

    pub fn earthquakes(&self) -> &EarthquakeLayer {
        &self.earthquakes
    }

    pub fn plates(&self) -> &PlateBoundaryLayer {
        &self.plates
    }

    pub fn control(&self) -> &LayerControl {
        &self.control
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    pub fn feed(&self, kind: FeedKind) -> &Feed {
        match kind {
            FeedKind::Earthquakes => &self.quake_feed,
            FeedKind::TectonicPlates => &self.plate_feed,
        }
    }

    pub(crate) fn feed_mut(&mut self, kind: FeedKind) -> &mut Feed {
        match kind {
            FeedKind::Earthquakes => &mut self.quake_feed,
            FeedKind::TectonicPlates => &mut self.plate_feed,
        }
    }

    pub fn status_messages(&self) -> &[StatusMessage] {
        &self.status
    }

    pub fn is_overlay_visible(&self, name: &str) -> Result<bool, ControlError> {
        self.control.is_overlay_visible(name)
    }

    /// Records a visibility change coming from the layer control.
    pub fn set_overlay_visible(&mut self, name: &str, visible: bool) -> Result<(), ControlError> {
        self.control.set_overlay_visible(name, visible)?;
        let verb = if visible { "shown" } else { "hidden" };
        self.events.emit("overlay", format!("{name} {verb}"));
        Ok(())
    }

    pub fn toggle_overlay(&mut self, name: &str) -> Result<bool, ControlError> {
        let visible = !self.control.is_overlay_visible(name)?;
        self.set_overlay_visible(name, visible)?;
        Ok(visible)
    }

    pub fn select_base_layer(&mut self, name: &str) -> Result<(), ControlError> {
        self.control.select_base(name)?;
        self.events.emit("base_layer", format!("{name} selected"));
        Ok(())
    }
}

use foundation::LatLng;
use layers::raster::TileSource;
use layers::symbology::PlateLineStyle;
use serde::{Deserialize, Serialize};

/// Everything the page needs to build the map. `Default` holds the stock
/// viewport, tile providers and feed URLs; a JSON document may override any
/// subset of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapConfig {
    /// Id of the element the map is mounted in.
    pub container_id: String,
    pub center: LatLng,
    pub zoom: u8,
    pub base_layers: Vec<BaseLayerConfig>,
    pub earthquake_feed_url: String,
    pub plate_feed_url: String,
    pub plate_style: PlateLineStyle,
    pub collapse_layer_control: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseLayerConfig {
    pub name: String,
    #[serde(flatten)]
    pub source: TileSource,
}

pub const EARTHQUAKES_OVERLAY: &str = "Earthquakes";
pub const PLATES_OVERLAY: &str = "Tectonic Plates";

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container_id: "map".to_string(),
            center: LatLng::new(37.7749, -122.4194),
            zoom: 5,
            base_layers: vec![
                BaseLayerConfig {
                    name: "Basemap".to_string(),
                    source: TileSource::openstreetmap(),
                },
                BaseLayerConfig {
                    name: "Street".to_string(),
                    source: TileSource::thunderforest_cycle(),
                },
            ],
            earthquake_feed_url: formats::USGS_ALL_WEEK_URL.to_string(),
            plate_feed_url: formats::PB2002_BOUNDARIES_URL.to_string(),
            plate_style: PlateLineStyle::default(),
            collapse_layer_control: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "map config is not valid JSON: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "map config rejected: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl MapConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: MapConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.center.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "center out of range: {:?}",
                self.center
            )));
        }
        if self.zoom > 22 {
            return Err(ConfigError::Invalid(format!("zoom {} above 22", self.zoom)));
        }
        if self.base_layers.is_empty() {
            return Err(ConfigError::Invalid("no base layers".to_string()));
        }
        for layer in &self.base_layers {
            let t = &layer.source.url_template;
            if !(t.contains("{z}") && t.contains("{x}") && t.contains("{y}")) {
                return Err(ConfigError::Invalid(format!(
                    "tile template for {:?} lacks {{z}}/{{x}}/{{y}}",
                    layer.name
                )));
            }
        }
        for url in [&self.earthquake_feed_url, &self.plate_feed_url] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "feed url must be http(s): {url}"
                )));
            }
        }
        Ok(())
    }
}

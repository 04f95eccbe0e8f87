use foundation::TileCoord;
use serde::{Deserialize, Serialize};

use crate::layer::{Layer, LayerId};

/// Options of an XYZ raster tile provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSource {
    /// URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
    pub url_template: String,
    pub attribution: String,
    #[serde(default = "default_subdomains")]
    pub subdomains: Vec<String>,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
}

fn default_subdomains() -> Vec<String> {
    vec!["a".to_string(), "b".to_string(), "c".to_string()]
}

fn default_max_zoom() -> u8 {
    18
}

impl TileSource {
    pub fn openstreetmap() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".to_string(),
            subdomains: default_subdomains(),
            max_zoom: default_max_zoom(),
        }
    }

    pub fn thunderforest_cycle() -> Self {
        Self {
            url_template: "https://{s}.tile.thunderforest.com/cycle/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.thunderforest.com/\">Thunderforest</a>"
                .to_string(),
            subdomains: default_subdomains(),
            max_zoom: 18,
        }
    }

    /// Fills the template for one tile. The subdomain is picked by
    /// `(x + y) mod n`, the same rotation the mapping library uses.
    pub fn tile_url(&self, coord: TileCoord) -> String {
        let subdomain = if self.subdomains.is_empty() {
            ""
        } else {
            let i = (coord.x as usize + coord.y as usize) % self.subdomains.len();
            self.subdomains[i].as_str()
        };
        self.url_template
            .replace("{s}", subdomain)
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }
}

/// A background layer in the layer control.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    id: LayerId,
    name: String,
    pub source: TileSource,
}

impl TileLayer {
    pub fn new(id: u64, name: impl Into<String>, source: TileSource) -> Self {
        Self {
            id: LayerId(id),
            name: name.into(),
            source,
        }
    }
}

impl Layer for TileLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

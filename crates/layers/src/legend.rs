//! Static depth legend.

use serde::{Deserialize, Serialize};

use crate::symbology::{Color, DEPTH_TIERS};

/// Corner a map control is anchored to.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl ControlPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlPosition::TopLeft => "topleft",
            ControlPosition::TopRight => "topright",
            ControlPosition::BottomLeft => "bottomleft",
            ControlPosition::BottomRight => "bottomright",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub lower_km: f64,
    /// `None` for the open-ended last interval.
    pub upper_km: Option<f64>,
    pub color: Color,
}

impl LegendEntry {
    /// `lo&ndash;hi` for closed intervals, `lo+` for the last one.
    pub fn label_html(&self) -> String {
        match self.upper_km {
            Some(hi) => format!("{}&ndash;{}", self.lower_km, hi),
            None => format!("{}+", self.lower_km),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub title: String,
    pub position: ControlPosition,
    pub entries: Vec<LegendEntry>,
}

pub const LEGEND_CLASS: &str = "info legend";

impl Legend {
    pub fn depth() -> Self {
        let entries = DEPTH_TIERS
            .iter()
            .enumerate()
            .map(|(i, tier)| LegendEntry {
                lower_km: tier.lower_km,
                upper_km: DEPTH_TIERS.get(i + 1).map(|next| next.lower_km),
                color: tier.color,
            })
            .collect();
        Self {
            title: "Depth (km)".to_string(),
            position: ControlPosition::BottomRight,
            entries,
        }
    }

    /// Inner HTML of the legend container.
    pub fn to_html(&self) -> String {
        let mut html = format!("<h4>{}</h4>", crate::popup::escape_html(&self.title));
        for entry in &self.entries {
            html.push_str(&format!(
                "<i style=\"background:{}\"></i> {}",
                entry.color,
                entry.label_html()
            ));
            if entry.upper_km.is_some() {
                html.push_str("<br>");
            }
        }
        html
    }
}

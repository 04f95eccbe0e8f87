//! Depth colouring and magnitude sizing for earthquake markers.
//!
//! Depth tiers, their colours and the legend all come from [`DEPTH_TIERS`],
//! so the legend can never disagree with the markers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 24-bit RGB colour, written as `#RRGGBB`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const BLACK: Color = Color([0x00, 0x00, 0x00]);
    pub const GREEN: Color = Color([0x00, 0xFF, 0x00]);
    pub const YELLOW: Color = Color([0xFF, 0xFF, 0x00]);
    pub const ORANGE: Color = Color([0xFF, 0xA5, 0x00]);
    pub const RED: Color = Color([0xFF, 0x00, 0x00]);

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    pub fn parse_hex(s: &str) -> Result<Self, String> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| format!("colour must start with '#': {s:?}"))?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(format!("colour must be #RRGGBB: {s:?}"));
        }
        let mut rgb = [0u8; 3];
        for (i, c) in rgb.iter_mut().enumerate() {
            *c = u8::from_str_radix(&digits[2 * i..2 * i + 2], 16)
                .map_err(|e| format!("bad colour {s:?}: {e}"))?;
        }
        Ok(Color(rgb))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// One depth interval. The interval runs from `lower_km` up to the next
/// tier's `lower_km`; the last tier is open-ended.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DepthTier {
    pub lower_km: f64,
    pub color: Color,
}

/// The first tier's lower bound only labels the legend; any depth below
/// the second tier's bound, negative depths included, is coloured green.
pub const DEPTH_TIERS: [DepthTier; 4] = [
    DepthTier {
        lower_km: -10.0,
        color: Color::GREEN,
    },
    DepthTier {
        lower_km: 10.0,
        color: Color::YELLOW,
    },
    DepthTier {
        lower_km: 30.0,
        color: Color::ORANGE,
    },
    DepthTier {
        lower_km: 50.0,
        color: Color::RED,
    },
];

/// Index into [`DEPTH_TIERS`] for a depth in kilometres.
///
/// Intervals are half-open, so a depth equal to a boundary belongs to the
/// deeper tier. NaN fails every comparison and lands in the last tier.
pub fn depth_tier(depth_km: f64) -> usize {
    for (i, tier) in DEPTH_TIERS.iter().enumerate().skip(1) {
        if depth_km < tier.lower_km {
            return i - 1;
        }
    }
    DEPTH_TIERS.len() - 1
}

pub fn depth_color(depth_km: f64) -> Color {
    DEPTH_TIERS[depth_tier(depth_km)].color
}

/// Marker radius in pixels: four pixels per unit of magnitude, unclamped.
pub fn magnitude_radius(magnitude: f64) -> f64 {
    magnitude * 4.0
}

/// Path options for one circle marker, named as the mapping library expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub color: Color,
    pub fill_color: Color,
    pub radius: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
    pub stroke: bool,
    pub weight: f64,
}

impl MarkerStyle {
    /// Style for one earthquake. A missing depth is treated as NaN and a
    /// missing magnitude as zero. Negative magnitudes give a zero radius.
    pub fn for_quake(depth_km: Option<f64>, magnitude: Option<f64>) -> Self {
        let depth = depth_km.unwrap_or(f64::NAN);
        let radius = magnitude_radius(magnitude.unwrap_or(0.0)).max(0.0);
        Self {
            color: Color::BLACK,
            fill_color: depth_color(depth),
            radius,
            opacity: 1.0,
            fill_opacity: 1.0,
            stroke: true,
            weight: 0.5,
        }
    }
}

/// Optional path options for plate boundary lines. Unset fields fall back
/// to the mapping library's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateLineStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn depth_tiers_are_half_open() {
        assert_eq!(depth_color(-5.0), Color::GREEN);
        assert_eq!(depth_color(9.999), Color::GREEN);
        assert_eq!(depth_color(10.0), Color::YELLOW);
        assert_eq!(depth_color(29.9), Color::YELLOW);
        assert_eq!(depth_color(30.0), Color::ORANGE);
        assert_eq!(depth_color(49.9), Color::ORANGE);
        assert_eq!(depth_color(50.0), Color::RED);
        assert_eq!(depth_color(650.0), Color::RED);
    }

    #[test]
    fn nan_depth_is_red() {
        assert_eq!(depth_color(f64::NAN), Color::RED);
    }

    #[test]
    fn radius_is_four_times_magnitude() {
        for m in [0.0, 0.5, 1.0, 2.0, 3.5, 7.8] {
            assert_eq!(magnitude_radius(m), 4.0 * m);
        }
        assert_eq!(magnitude_radius(-1.0), -4.0);
    }

    #[test]
    fn shallow_small_quake_style() {
        let style = MarkerStyle::for_quake(Some(5.0), Some(2.0));
        assert_eq!(
            style,
            MarkerStyle {
                color: Color::BLACK,
                fill_color: Color::GREEN,
                radius: 8.0,
                opacity: 1.0,
                fill_opacity: 1.0,
                stroke: true,
                weight: 0.5,
            }
        );
    }

    #[test]
    fn intermediate_quake_style() {
        let style = MarkerStyle::for_quake(Some(45.0), Some(3.5));
        assert_eq!(style.fill_color.to_hex(), "#FFA500");
        assert_eq!(style.radius, 14.0);
    }

    #[test]
    fn negative_or_missing_magnitude_gives_zero_radius() {
        assert_eq!(MarkerStyle::for_quake(Some(1.0), Some(-0.7)).radius, 0.0);
        assert_eq!(MarkerStyle::for_quake(Some(1.0), None).radius, 0.0);
        assert_eq!(
            MarkerStyle::for_quake(None, Some(1.0)).fill_color,
            Color::RED
        );
    }

    #[test]
    fn serializes_with_library_option_names() {
        let v = serde_json::to_value(MarkerStyle::for_quake(Some(5.0), Some(2.0))).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "color": "#000000",
                "fillColor": "#00FF00",
                "radius": 8.0,
                "opacity": 1.0,
                "fillOpacity": 1.0,
                "stroke": true,
                "weight": 0.5
            })
        );
    }

    #[test]
    fn colour_hex_parsing() {
        assert_eq!(Color::parse_hex("#ffa500"), Ok(Color::ORANGE));
        assert!(Color::parse_hex("FFA500").is_err());
        assert!(Color::parse_hex("#FFA5").is_err());
        assert!(Color::parse_hex("#GGGGGG").is_err());
    }

    #[test]
    fn plate_style_omits_unset_fields() {
        let v = serde_json::to_value(PlateLineStyle::default()).unwrap();
        assert_eq!(v, serde_json::json!({}));
        let s: PlateLineStyle = serde_json::from_str(r##"{"color":"#FF8800","weight":2}"##).unwrap();
        assert_eq!(s.color, Some(Color([0xFF, 0x88, 0x00])));
        assert_eq!(s.weight, Some(2.0));
    }
}

//! Layer switcher state: one active base layer, independently visible
//! overlays.

use tracing::debug;

use crate::layer::LayerId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlEntry {
    pub id: LayerId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    UnknownLayer(String),
    NoBaseLayers,
}

impl std::fmt::Display for ControlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlError::UnknownLayer(name) => write!(f, "no layer named {name:?} in control"),
            ControlError::NoBaseLayers => write!(f, "layer control needs at least one base layer"),
        }
    }
}

impl std::error::Error for ControlError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerControl {
    base_layers: Vec<ControlEntry>,
    active_base: usize,
    overlays: Vec<(ControlEntry, bool)>,
    pub collapsed: bool,
}

impl LayerControl {
    /// The first base layer starts active; overlays start visible.
    pub fn new(
        base_layers: Vec<ControlEntry>,
        overlays: Vec<ControlEntry>,
    ) -> Result<Self, ControlError> {
        if base_layers.is_empty() {
            return Err(ControlError::NoBaseLayers);
        }
        Ok(Self {
            base_layers,
            active_base: 0,
            overlays: overlays.into_iter().map(|o| (o, true)).collect(),
            collapsed: false,
        })
    }

    pub fn base_layers(&self) -> &[ControlEntry] {
        &self.base_layers
    }

    pub fn overlays(&self) -> impl Iterator<Item = (&ControlEntry, bool)> {
        self.overlays.iter().map(|(e, v)| (e, *v))
    }

    pub fn active_base(&self) -> &ControlEntry {
        &self.base_layers[self.active_base]
    }

    pub fn select_base(&mut self, name: &str) -> Result<LayerId, ControlError> {
        let idx = self
            .base_layers
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| ControlError::UnknownLayer(name.to_string()))?;
        self.active_base = idx;
        debug!(layer = name, "base layer selected");
        Ok(self.base_layers[idx].id)
    }

    pub fn is_overlay_visible(&self, name: &str) -> Result<bool, ControlError> {
        self.overlays
            .iter()
            .find(|(e, _)| e.name == name)
            .map(|(_, v)| *v)
            .ok_or_else(|| ControlError::UnknownLayer(name.to_string()))
    }

    /// Touches only the named overlay.
    pub fn set_overlay_visible(&mut self, name: &str, visible: bool) -> Result<LayerId, ControlError> {
        let (entry, v) = self
            .overlays
            .iter_mut()
            .find(|(e, _)| e.name == name)
            .ok_or_else(|| ControlError::UnknownLayer(name.to_string()))?;
        *v = visible;
        debug!(layer = name, visible, "overlay visibility changed");
        Ok(entry.id)
    }

    pub fn toggle_overlay(&mut self, name: &str) -> Result<bool, ControlError> {
        let visible = !self.is_overlay_visible(name)?;
        self.set_overlay_visible(name, visible)?;
        Ok(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control() -> LayerControl {
        LayerControl::new(
            vec![
                ControlEntry {
                    id: LayerId(1),
                    name: "Basemap".to_string(),
                },
                ControlEntry {
                    id: LayerId(2),
                    name: "Street".to_string(),
                },
            ],
            vec![
                ControlEntry {
                    id: LayerId(3),
                    name: "Earthquakes".to_string(),
                },
                ControlEntry {
                    id: LayerId(4),
                    name: "Tectonic Plates".to_string(),
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn overlays_toggle_independently() {
        let mut c = control();
        assert_eq!(c.toggle_overlay("Earthquakes"), Ok(false));
        assert_eq!(c.is_overlay_visible("Tectonic Plates"), Ok(true));

        assert_eq!(c.toggle_overlay("Tectonic Plates"), Ok(false));
        assert_eq!(c.is_overlay_visible("Earthquakes"), Ok(false));

        assert_eq!(c.toggle_overlay("Earthquakes"), Ok(true));
        assert_eq!(c.is_overlay_visible("Tectonic Plates"), Ok(false));
    }

    #[test]
    fn base_layers_are_exclusive() {
        let mut c = control();
        assert_eq!(c.active_base().name, "Basemap");
        assert_eq!(c.select_base("Street"), Ok(LayerId(2)));
        assert_eq!(c.active_base().name, "Street");
        // Overlays are untouched by base selection.
        assert!(c.overlays().all(|(_, visible)| visible));
    }

    #[test]
    fn unknown_names_are_errors() {
        let mut c = control();
        assert_eq!(
            c.select_base("Satellite"),
            Err(ControlError::UnknownLayer("Satellite".to_string()))
        );
        assert!(c.toggle_overlay("Basemap").is_err());
        assert_eq!(
            LayerControl::new(Vec::new(), Vec::new()),
            Err(ControlError::NoBaseLayers)
        );
    }
}

use serde::{Deserialize, Serialize};

use crate::geo::LatLng;
use crate::projection::project_normalized;

/// Tile coordinate in the ZXY scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    pub fn new(z: u8, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Tile containing `p` at zoom `z`.
    pub fn containing(p: LatLng, z: u8) -> Self {
        let (nx, ny) = project_normalized(p.wrapped());
        let n = 1u64 << z;
        let max = (n - 1) as f64;
        let x = (nx * n as f64).floor().clamp(0.0, max) as u32;
        let y = (ny * n as f64).floor().clamp(0.0, max) as u32;
        Self { z, x, y }
    }

}

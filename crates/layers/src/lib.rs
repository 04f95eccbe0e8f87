pub mod control;
pub mod layer;
pub mod legend;
pub mod popup;
pub mod raster;
pub mod symbology;
pub mod vector;

pub use layer::*;

pub mod geo;
pub mod projection;
pub mod tile;

// Foundation crate: small, well-tested geographic primitives only.
pub use geo::*;
pub use projection::*;
pub use tile::*;

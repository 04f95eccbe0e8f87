pub mod builders;
pub mod config;
pub mod context;
pub mod event_bus;
pub mod feed;

pub use builders::*;
pub use config::*;
pub use context::*;
pub use event_bus::*;
pub use feed::*;

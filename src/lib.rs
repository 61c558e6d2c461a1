pub mod backend;
pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod math;
pub mod model;
pub mod tags;

pub use backend::{GeoBackend, Session};
pub use builder::{BuildDoubleTorus, BuildSummary};
pub use config::TorusParams;
pub use error::{Result, ToroshellError};
pub use model::GeoModel;

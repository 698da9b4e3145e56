pub mod api;
pub mod config;
pub mod error;
pub mod graph;

pub use config::Config;
pub use error::{KgserveError, Result};
pub use graph::{Entity, GraphData, Relationship};

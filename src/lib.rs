pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, ReportFormat};

pub use adapters::HttpFetcher;
pub use core::engine::{ScanEngine, ScanOutcome};
pub use core::traverse::{ScanStats, Traverser};
pub use domain::model::TiledServiceRecord;
pub use utils::error::{Result, ScanError};

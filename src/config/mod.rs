#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, ReportFormat};

pub const DEFAULT_BASE_URL: &str = "https://server.arcgisonline.com/arcgis/rest/services/";
pub const REQUEST_TIMEOUT_SECS: u64 = 20;

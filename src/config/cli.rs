use crate::config::{DEFAULT_BASE_URL, REQUEST_TIMEOUT_SECS};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_directory_url, validate_positive_number, Validate};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "arcgis-tiles")]
#[command(about = "List the tiled MapServer services of an ArcGIS REST directory")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS, help = "Per-request timeout in seconds")]
    pub timeout_seconds: u64,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit diagnostics as JSON lines")]
    pub log_json: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: REQUEST_TIMEOUT_SECS,
            format: ReportFormat::Text,
            verbose: false,
            log_json: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_directory_url("base_url", &self.base_url)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_constants() {
        let config = CliConfig::parse_from(["arcgis-tiles"]);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_seconds, 20);
        assert_eq!(config.format, ReportFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_overrides() {
        let config = CliConfig::parse_from([
            "arcgis-tiles",
            "--base-url",
            "http://localhost:6080/arcgis/rest/services/",
            "--timeout-seconds",
            "5",
            "--format",
            "json",
            "--verbose",
        ]);
        assert_eq!(config.timeout_seconds(), 5);
        assert_eq!(config.format, ReportFormat::Json);
        assert!(config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let config = CliConfig {
            base_url: "http://localhost:6080/arcgis/rest/services".to_string(),
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CliConfig {
            timeout_seconds: 0,
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

use crate::adapters::HttpFetcher;
use crate::core::traverse::{ScanStats, Traverser};
use crate::core::{ConfigProvider, Fetcher, TiledServiceRecord};
use crate::utils::error::{Result, ScanError};
use url::Url;

#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Discovery order; sorting is left to reporting.
    pub records: Vec<TiledServiceRecord>,
    pub stats: ScanStats,
}

pub struct ScanEngine<F: Fetcher> {
    fetcher: F,
    base_url: String,
}

impl ScanEngine<HttpFetcher> {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let fetcher = HttpFetcher::from_config(config)?;
        Ok(Self::new(fetcher, config.base_url()))
    }
}

impl<F: Fetcher> ScanEngine<F> {
    pub fn new(fetcher: F, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    /// Runs the whole scan. Never fails: whatever was collected (possibly
    /// nothing) is returned so a report can always be printed.
    pub async fn run(&self) -> ScanOutcome {
        tracing::info!("🚀 Starting scrape process from: {}", self.base_url);

        let mut records = Vec::new();
        let stats = match self.scan(&mut records).await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!(
                    "❌ An unexpected critical error occurred during scraping: {} (Kind: {:?})",
                    e,
                    e.kind()
                );
                ScanStats::default()
            }
        };

        tracing::info!(
            "Scraping finished. Found {} potential tile servers.",
            records.len()
        );
        tracing::info!(
            "📊 Directories: {} visited, {} failed - Services: {} checked, {} failed",
            stats.directories_visited,
            stats.directories_failed,
            stats.services_inspected,
            stats.services_failed
        );

        ScanOutcome { records, stats }
    }

    async fn scan(&self, records: &mut Vec<TiledServiceRecord>) -> Result<ScanStats> {
        let root = Url::parse(&self.base_url).map_err(|e| ScanError::InvalidUrl {
            url: self.base_url.clone(),
            source: e,
        })?;

        let traverser = Traverser::new(&self.fetcher, root);
        Ok(traverser.traverse_root(records).await)
    }
}

use crate::core::inspect::inspect_service;
use crate::core::{DirectoryListing, Fetcher, TiledServiceRecord};
use crate::utils::error::{Result, ScanError};
use url::Url;

/// The only service type that is inspected. ImageServer can also be cached
/// but is left out on purpose.
pub const TARGET_SERVICE_TYPE: &str = "MapServer";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub directories_visited: usize,
    pub directories_failed: usize,
    pub services_inspected: usize,
    pub services_failed: usize,
    pub tiled_services: usize,
}

/// Walks the directory tree below a fixed base address.
///
/// Child addresses are always resolved against the base, because listings
/// return folder-qualified names (`Elevation/World_Hillshade`) rather than
/// names relative to the current folder.
pub struct Traverser<F: Fetcher> {
    fetcher: F,
    base_url: Url,
}

impl<F: Fetcher> Traverser<F> {
    pub fn new(fetcher: F, base_url: Url) -> Self {
        Self { fetcher, base_url }
    }

    /// `{name}/{type}` resolved against the base.
    pub fn service_url(&self, name: &str, service_type: &str) -> Result<Url> {
        let reference = format!("{}/{}", name, service_type);
        self.resolve(&reference)
    }

    /// `{folder}/` resolved against the base. The trailing slash keeps later
    /// resolution rooted at the folder itself.
    pub fn folder_url(&self, folder: &str) -> Result<Url> {
        let reference = format!("{}/", folder);
        self.resolve(&reference)
    }

    fn resolve(&self, reference: &str) -> Result<Url> {
        self.base_url
            .join(reference)
            .map_err(|e| ScanError::InvalidUrl {
                url: reference.to_string(),
                source: e,
            })
    }

    /// Depth-first walk starting at the base address.
    pub async fn traverse_root(&self, results: &mut Vec<TiledServiceRecord>) -> ScanStats {
        self.traverse(self.base_url.clone(), results).await
    }

    /// Depth-first, pre-order walk from `start`, appending every tiled
    /// service found to `results`. Failed nodes contribute nothing.
    pub async fn traverse(&self, start: Url, results: &mut Vec<TiledServiceRecord>) -> ScanStats {
        let mut stats = ScanStats::default();
        let mut pending = vec![start];

        while let Some(directory) = pending.pop() {
            tracing::info!("📂 Processing directory: {}", directory);
            stats.directories_visited += 1;

            let listing = match self.fetch_listing(&directory).await {
                Ok(listing) => listing,
                Err(e) => {
                    tracing::debug!("Skipping branch {} ({:?})", directory, e.kind());
                    stats.directories_failed += 1;
                    continue;
                }
            };

            // 先處理這一層的服務
            for service in listing.services() {
                let Some(name) = service.name.as_deref().filter(|n| !n.is_empty()) else {
                    tracing::debug!("Skipping service entry without name: {:?}", service);
                    continue;
                };
                if !service.is_type(TARGET_SERVICE_TYPE) {
                    continue;
                }

                let service_url = match self.service_url(name, TARGET_SERVICE_TYPE) {
                    Ok(url) => url,
                    Err(e) => {
                        tracing::warn!("{}", e);
                        stats.services_failed += 1;
                        continue;
                    }
                };

                tracing::info!("🔎 Checking service: {}", service_url);
                stats.services_inspected += 1;
                match inspect_service(&self.fetcher, &service_url).await {
                    Ok(Some(record)) => {
                        tracing::info!("✅ Found tiled service: {}", record.name);
                        stats.tiled_services += 1;
                        results.push(record);
                    }
                    Ok(None) => {}
                    Err(_) => stats.services_failed += 1,
                }
            }

            // 反向推入，讓第一個資料夾最先被展開
            let mut children = Vec::with_capacity(listing.folders().len());
            for folder in listing.folders() {
                match self.folder_url(folder) {
                    Ok(url) => children.push(url),
                    Err(e) => tracing::warn!("{}", e),
                }
            }
            pending.extend(children.into_iter().rev());
        }

        stats
    }

    async fn fetch_listing(&self, directory: &Url) -> Result<DirectoryListing> {
        let data = self.fetcher.fetch(directory).await?;
        DirectoryListing::from_value(data).map_err(|e| {
            let err = ScanError::shape(directory.as_str(), e.to_string());
            tracing::warn!(kind = ?err.kind(), "{}", err);
            err
        })
    }
}

use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

/// Single request against the services tree.
///
/// Implementations turn every failure into a `ScanError` value; they never
/// panic on bad responses, so one bad node cannot take down the scan.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Value>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for &F {
    async fn fetch(&self, url: &Url) -> Result<Value> {
        (**self).fetch(url).await
    }
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}

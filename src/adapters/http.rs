use crate::domain::ports::{ConfigProvider, Fetcher};
use crate::utils::error::{Result, ScanError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Returns `url` with `f=json` in its query, unless some `f=json` pair is
/// already there (compared case-insensitively).
pub fn with_json_format(url: &Url) -> Url {
    let present = url
        .query_pairs()
        .any(|(key, value)| key.eq_ignore_ascii_case("f") && value.eq_ignore_ascii_case("json"));
    if present {
        return url.clone();
    }

    let mut normalized = url.clone();
    normalized.query_pairs_mut().append_pair("f", "json");
    normalized
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout_secs: u64,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ScanError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.timeout_seconds())
    }

    fn classify(&self, url: &Url, error: reqwest::Error) -> ScanError {
        if error.is_timeout() {
            ScanError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout_secs,
            }
        } else if error.is_builder() {
            ScanError::Unexpected {
                url: url.to_string(),
                message: error.to_string(),
            }
        } else {
            ScanError::Transport {
                url: url.to_string(),
                source: error,
            }
        }
    }

    async fn request(&self, url: &Url) -> Result<Value> {
        let request_url = with_json_format(url);
        tracing::info!("Requesting URL: {}", request_url);

        let response = self
            .client
            .get(request_url.clone())
            .send()
            .await
            .map_err(|e| self.classify(&request_url, e))?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        // 只有 4xx / 5xx 視為失敗
        if status.is_client_error() || status.is_server_error() {
            return Err(ScanError::HttpStatus {
                url: request_url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.classify(&request_url, e))?;

        let json_data: Value = serde_json::from_str(&body).map_err(|e| ScanError::Decode {
            url: request_url.to_string(),
            source: e,
        })?;

        // ArcGIS 常以 200 回傳 {"error": {...}}
        if let Some(error) = json_data.get("error").filter(|e| e.is_object()) {
            return Err(ScanError::Remote {
                url: request_url.to_string(),
                code: error.get("code").and_then(Value::as_i64).unwrap_or_default(),
                message: error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("no message")
                    .to_string(),
            });
        }

        Ok(json_data)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Value> {
        let result = self.request(url).await;
        if let Err(e) = &result {
            tracing::warn!(kind = ?e.kind(), "⚠️ {}", e);
        }
        result
    }
}

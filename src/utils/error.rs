use thiserror::Error;

/// Failure classes a single node of the scan can run into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Timeout,
    HttpStatus,
    Decode,
    Remote,
    Shape,
    Config,
    Unexpected,
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Timeout error fetching {url} (limit {timeout_secs}s)")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("Request error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error fetching {url}: status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Error decoding JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Server reported error {code} for {url}: {message}")]
    Remote {
        url: String,
        code: i64,
        message: String,
    },

    #[error("Unexpected response shape from {url}: {message}")]
    Shape { url: String, message: String },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unexpected error processing {url}: {message}")]
    Unexpected { url: String, message: String },
}

impl ScanError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ScanError::Timeout { .. } => FailureKind::Timeout,
            ScanError::Transport { .. } => FailureKind::Transport,
            ScanError::HttpStatus { .. } => FailureKind::HttpStatus,
            ScanError::Decode { .. } => FailureKind::Decode,
            ScanError::Remote { .. } => FailureKind::Remote,
            ScanError::Shape { .. } => FailureKind::Shape,
            ScanError::InvalidUrl { .. } => FailureKind::Config,
            ScanError::ConfigError { .. } | ScanError::InvalidConfigValueError { .. } => {
                FailureKind::Config
            }
            ScanError::Unexpected { .. } => FailureKind::Unexpected,
        }
    }

    pub fn shape(url: &str, message: impl Into<String>) -> Self {
        ScanError::Shape {
            url: url.to_string(),
            message: message.into(),
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ScanError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid --{}: {}", field.replace('_', "-"), reason)
            }
            ScanError::ConfigError { message } => format!("Configuration problem: {}", message),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err = ScanError::HttpStatus {
            url: "http://example.com".to_string(),
            status: 500,
        };
        assert_eq!(err.kind(), FailureKind::HttpStatus);

        let err = ScanError::shape("http://example.com", "tileInfo is not an object");
        assert_eq!(err.kind(), FailureKind::Shape);
        assert!(err.to_string().contains("tileInfo is not an object"));
    }

    #[test]
    fn test_user_friendly_message_for_config_value() {
        let err = ScanError::InvalidConfigValueError {
            field: "base_url".to_string(),
            value: "ftp://x".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "Invalid --base-url: Unsupported URL scheme: ftp"
        );
    }
}

use reqwest::header::HeaderMap;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GhbarError>;

#[derive(Error, Debug)]
pub enum GhbarError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        url: String,
        status: u16,
        headers: HeaderMap,
    },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Corrupt history store {}: {source}", path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write history store {}: {source}", path.display())]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GhbarError {
    /// Seconds since the epoch at which GitHub lifts the rate limit, when this
    /// is a 403 carrying `x-ratelimit-reset`.
    pub fn rate_limit_reset(&self) -> Option<i64> {
        match self {
            GhbarError::HttpStatus { status: 403, headers, .. } => headers
                .get("x-ratelimit-reset")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<i64>().ok()),
            _ => None,
        }
    }
}

//! geolens: an AI-visibility scanner for web pages
//!
//! This crate fetches a single page, extracts the structural and metadata
//! signals generative-AI crawlers rely on, probes the site's `robots.txt` and
//! `sitemap.xml`, and reduces everything to a weighted checklist and a 0-100
//! score with remediation suggestions.

pub mod config;
pub mod output;
pub mod robots;
pub mod scan;
pub mod score;
pub mod server;
pub mod url;

use thiserror::Error;

/// Scan-level failures
///
/// Only these abort a scan. Heuristic noise (a malformed JSON-LD block, an
/// unresolvable link, an unknown charset, an unreachable robots.txt) is
/// recovered where it happens and never surfaces here.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] UrlError),

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Unsupported content type: {}", display_content_type(.content_type))]
    UnsupportedContentType { content_type: String },

    #[error("Page too large: more than {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Fetch failed for {url}: {cause}")]
    FetchFailed { url: String, cause: FetchFailure },

    #[error("HTTP client error: {0}")]
    HttpClient(reqwest::Error),
}

impl ScanError {
    /// Returns true if the caller can fix the failure by changing the request
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

fn display_content_type(content_type: &str) -> &str {
    if content_type.is_empty() {
        "unknown content-type"
    } else {
        content_type
    }
}

/// Underlying reason of a [`ScanError::FetchFailed`]
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Valid http(s) URL required")]
    Missing,

    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use scan::{ScanReport, ScanRequest, Scanner};
pub use score::{CheckItem, CheckKey, Status};

//! HTTP fetcher implementation
//!
//! This module handles the single page request of a scan:
//! - Building the HTTP client with the scanner's user agent string
//! - A wall-clock deadline covering connect, headers and body
//! - Content-Type validation before the body is read
//! - A hard size ceiling on the body (oversized bodies are rejected, never truncated)
//! - Error classification into [`ScanError`] variants
//!
//! There are no retries. A transient failure surfaces to the caller.

use crate::config::Config;
use crate::{FetchFailure, ScanError};
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE};
use reqwest::{redirect::Policy, Client, Response};
use std::time::Duration;
use url::Url;

/// Content types the signal extractor knows how to read
const HTML_CONTENT_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// Raw result of a successful page fetch
#[derive(Debug)]
pub struct FetchResult {
    /// Response body, at most the configured byte limit
    pub raw_bytes: Vec<u8>,
    /// Final URL after redirects
    pub final_url: Url,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value
    pub content_type: String,
    /// All response headers
    pub headers: HeaderMap,
}

impl FetchResult {
    /// Value of a response header as text, or an empty string
    pub fn header(&self, name: &str) -> String {
        header_value(&self.headers, name)
    }
}

/// Why reading a body stopped early
#[derive(Debug)]
pub(crate) enum BodyError {
    TooLarge,
    Transport(reqwest::Error),
}

/// Builds an HTTP client with proper configuration
///
/// The client follows up to `max-redirects` hops. Deadlines are applied per
/// call by the caller, so the client itself carries no global timeout.
///
/// # Example
///
/// ```no_run
/// use geolens::config::Config;
/// use geolens::scan::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .redirect(Policy::limited(config.fetch.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page within `deadline`
///
/// # Request Flow
///
/// 1. GET with `Accept: text/html,*/*`, following redirects
/// 2. Non-2xx status → `FetchFailed(status)`
/// 3. Content-Type without an HTML type → `UnsupportedContentType`
/// 4. Declared or streamed body larger than `max_bytes` → `PayloadTooLarge`
///
/// | Condition | Result |
/// |-----------|--------|
/// | Deadline exceeded | `Timeout` |
/// | DNS / connection / TLS error | `FetchFailed(cause)` |
/// | Too many redirects | `FetchFailed(cause)` |
pub async fn fetch_page(
    client: &Client,
    url: &Url,
    deadline: Duration,
    max_bytes: usize,
) -> Result<FetchResult, ScanError> {
    match tokio::time::timeout(deadline, fetch_page_inner(client, url, max_bytes)).await {
        Ok(result) => result,
        Err(_) => Err(ScanError::Timeout {
            url: url.to_string(),
        }),
    }
}

async fn fetch_page_inner(
    client: &Client,
    url: &Url,
    max_bytes: usize,
) -> Result<FetchResult, ScanError> {
    let response = client
        .get(url.clone())
        .header(ACCEPT, "text/html,*/*")
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    let final_url = response.url().clone();

    if !status.is_success() {
        return Err(ScanError::FetchFailed {
            url: url.to_string(),
            cause: FetchFailure::Status(status.as_u16()),
        });
    }

    let content_type = header_value(response.headers(), CONTENT_TYPE.as_str());
    if !is_html_content_type(&content_type) {
        return Err(ScanError::UnsupportedContentType { content_type });
    }

    let headers = response.headers().clone();
    let raw_bytes = read_body_capped(response, max_bytes)
        .await
        .map_err(|e| match e {
            BodyError::TooLarge => ScanError::PayloadTooLarge { limit: max_bytes },
            BodyError::Transport(e) => classify_error(url, e),
        })?;

    tracing::debug!(
        "Fetched {} ({} bytes, {})",
        final_url,
        raw_bytes.len(),
        content_type
    );

    Ok(FetchResult {
        raw_bytes,
        final_url,
        status_code: status.as_u16(),
        content_type,
        headers,
    })
}

/// Returns true if the Content-Type value names an HTML-compatible type
pub fn is_html_content_type(content_type: &str) -> bool {
    let content_type = content_type.to_lowercase();
    HTML_CONTENT_TYPES
        .iter()
        .any(|html| content_type.contains(html))
}

/// Reads a response body, giving up as soon as it exceeds `max_bytes`
pub(crate) async fn read_body_capped(
    mut response: Response,
    max_bytes: usize,
) -> Result<Vec<u8>, BodyError> {
    if let Some(declared) = response.content_length() {
        if declared > max_bytes as u64 {
            return Err(BodyError::TooLarge);
        }
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(BodyError::Transport)? {
        if body.len() + chunk.len() > max_bytes {
            return Err(BodyError::TooLarge);
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

/// All values of a header joined with ", ", or an empty string when missing
///
/// Values that are not visible ASCII are skipped.
pub(crate) fn header_value(headers: &HeaderMap, name: &str) -> String {
    headers
        .get_all(name)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Classifies a transport error
fn classify_error(url: &Url, error: reqwest::Error) -> ScanError {
    if error.is_timeout() {
        return ScanError::Timeout {
            url: url.to_string(),
        };
    }

    ScanError::FetchFailed {
        url: url.to_string(),
        cause: FetchFailure::Transport(error_chain(&error)),
    }
}

/// Joins an error and its sources, e.g. "error sending request: connection refused"
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

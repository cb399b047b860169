//! Scan engine
//!
//! This module contains the single-page scan pipeline:
//! - Bounded page fetch ([`fetch_page`])
//! - Charset resolution and decoding ([`decode_html`])
//! - Pattern-based signal extraction ([`extract_signals`])
//! - The robots.txt / sitemap.xml probe, run concurrently with extraction
//! - Scoring and suggestions ([`crate::score`])
//!
//! A [`Scanner`] holds only the HTTP client and limits; it keeps no state
//! between scans and can be shared across tasks.

pub mod charset;
mod extract;
pub(crate) mod fetcher;
mod markup;
mod report;
mod signals;

pub use charset::{decode_html, resolve_charset, CharsetSource, ResolvedCharset};
pub use extract::{
    count_internal_links, count_open_tags, count_words, extract_canonical, extract_description,
    extract_html_lang, extract_meta_content, extract_meta_lang, extract_robots_directives,
    extract_signals, extract_structured_data, extract_title, parse_directives, visible_text,
    StructuredData,
};
pub use fetcher::{build_http_client, fetch_page, is_html_content_type, FetchResult};
pub use report::{Heuristics, PageMeta, ScanReport};
pub use signals::{PageSignals, SiteSignals};

use crate::config::{Config, FetchConfig};
use crate::robots::{probe_site, ProbeLimits};
use crate::score::{evaluate, suggestions};
use crate::url::parse_scan_url;
use crate::ScanError;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

/// A caller's scan request: `{ "url": "https://..." }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub url: String,
}

impl ScanRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Stateless scan engine
#[derive(Debug, Clone)]
pub struct Scanner {
    client: Client,
    limits: FetchConfig,
}

impl Scanner {
    /// Creates a scanner from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Scanner)` - Ready to scan
    /// * `Err(ScanError::HttpClient)` - The HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, ScanError> {
        let client = build_http_client(config).map_err(ScanError::HttpClient)?;
        Ok(Self {
            client,
            limits: config.fetch.clone(),
        })
    }

    /// Runs one scan
    ///
    /// # Pipeline
    ///
    /// 1. Validate the URL (no network activity on failure)
    /// 2. Fetch the page; any failure here aborts the scan
    /// 3. Spawn the site probe against the final URL's origin
    /// 4. Decode and extract page signals while the probe runs
    /// 5. Join the probe; a failed probe task degrades to empty site signals
    /// 6. Score, derive suggestions, assemble the report
    ///
    /// # Example
    ///
    /// ```no_run
    /// use geolens::{Config, ScanRequest, Scanner};
    ///
    /// # async fn example() -> Result<(), geolens::ScanError> {
    /// let scanner = Scanner::new(&Config::default())?;
    /// let report = scanner.scan(&ScanRequest::new("https://example.com/")).await?;
    /// println!("{}: {}/100", report.final_url, report.score);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn scan(&self, request: &ScanRequest) -> Result<ScanReport, ScanError> {
        let url = parse_scan_url(&request.url)?;
        tracing::debug!("Scanning {}", url);

        let fetched = fetch_page(&self.client, &url, self.limits.timeout(), self.limits.max_bytes)
            .await?;

        let probe = tokio::spawn(probe_site(
            self.client.clone(),
            fetched.final_url.clone(),
            ProbeLimits {
                timeout: self.limits.probe_timeout(),
                max_bytes: self.limits.max_bytes,
            },
        ));

        let (html, charset) = decode_html(&fetched.raw_bytes, &fetched.content_type);
        let page = extract_signals(&html, &fetched.final_url, &fetched.header("x-robots-tag"));

        let site = match probe.await {
            Ok(site) => site,
            Err(e) => {
                tracing::warn!("Site probe for {} did not complete: {}", fetched.final_url, e);
                SiteSignals::default()
            }
        };

        let evaluation = evaluate(&page, &site);
        let suggestions = suggestions(&evaluation.checklist);

        tracing::info!(
            "Scanned {} → score {} ({} suggestions)",
            fetched.final_url,
            evaluation.score,
            suggestions.len()
        );

        let meta = PageMeta {
            final_url: fetched.final_url.to_string(),
            content_type: fetched.content_type.clone(),
            content_language: fetched.header("content-language"),
            html_lang: page.html_lang.clone(),
            meta_lang: page.meta_lang.clone(),
            canonical: page.canonical_url.clone(),
            title: page.title.clone(),
            description: page.description.clone(),
            charset: charset.name().to_string(),
        };

        Ok(ScanReport {
            requested_url: request.url.trim().to_string(),
            final_url: fetched.final_url.to_string(),
            score: evaluation.score,
            checklist: evaluation.checklist,
            suggestions,
            scanned_at: Utc::now(),
            heur: Heuristics::from_signals(&page, &site),
            meta,
            page,
            site,
        })
    }
}

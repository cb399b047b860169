//! Site probe: best-effort fetches of `/robots.txt` and `/sitemap.xml`
//!
//! Both requests run concurrently, each under its own deadline. Any failure
//! (network error, timeout, non-2xx status, oversized body) is logged and
//! recorded as "not reachable"; the probe itself cannot fail.

use crate::robots::RobotsTxt;
use crate::scan::fetcher::{header_value, read_body_capped};
use crate::scan::SiteSignals;
use crate::url::origin_of;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use url::Url;

const X_ROBOTS_TAG: &str = "x-robots-tag";

/// Per-request limits for the probe
#[derive(Debug, Clone, Copy)]
pub struct ProbeLimits {
    /// Deadline for each request
    pub timeout: Duration,
    /// Largest robots.txt body read
    pub max_bytes: usize,
}

/// Outcome of one probe request
#[derive(Debug, Default)]
struct ProbeResponse {
    reachable: bool,
    x_robots_tag: String,
    body: Option<String>,
}

/// Probes the origin of `page_url`
///
/// Takes owned arguments so it can run as a spawned task alongside signal
/// extraction. `page_url` is also the URL that AI crawler access is checked
/// against.
pub async fn probe_site(client: Client, page_url: Url, limits: ProbeLimits) -> SiteSignals {
    let origin = origin_of(&page_url);
    let robots_url = format!("{}/robots.txt", origin);
    let sitemap_url = format!("{}/sitemap.xml", origin);

    let (robots, sitemap) = tokio::join!(
        probe_resource(&client, &robots_url, "text/plain,*/*", true, limits),
        probe_resource(
            &client,
            &sitemap_url,
            "application/xml,text/xml,*/*",
            false,
            limits
        ),
    );

    let robots_txt = robots.body.as_deref().map(RobotsTxt::from_content);

    // robots.txt response takes priority
    let x_robots_header = if robots.x_robots_tag.is_empty() {
        sitemap.x_robots_tag
    } else {
        robots.x_robots_tag
    };

    let signals = SiteSignals {
        robots_txt_reachable: robots.reachable,
        sitemap_reachable: sitemap.reachable,
        sitemap_referenced_in_robots: robots_txt
            .as_ref()
            .is_some_and(RobotsTxt::references_sitemap),
        x_robots_header,
        sitemap_urls: robots_txt
            .as_ref()
            .map(RobotsTxt::sitemap_urls)
            .unwrap_or_default(),
        ai_crawlers_blocked: robots_txt
            .as_ref()
            .map(|robots| robots.blocked_ai_crawlers(page_url.as_str()))
            .unwrap_or_default(),
    };

    tracing::debug!(
        "Probed {}: robots.txt={}, sitemap.xml={}, sitemap referenced={}",
        origin,
        signals.robots_txt_reachable,
        signals.sitemap_reachable,
        signals.sitemap_referenced_in_robots
    );

    signals
}

/// Fetches one probe resource, recovering every failure locally
async fn probe_resource(
    client: &Client,
    url: &str,
    accept: &str,
    read_body: bool,
    limits: ProbeLimits,
) -> ProbeResponse {
    match tokio::time::timeout(limits.timeout, request(client, url, accept, read_body, limits))
        .await
    {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            tracing::warn!("{} not reachable: {}", url, e);
            ProbeResponse::default()
        }
        Err(_) => {
            tracing::warn!("{} timed out after {:?}", url, limits.timeout);
            ProbeResponse::default()
        }
    }
}

async fn request(
    client: &Client,
    url: &str,
    accept: &str,
    read_body: bool,
    limits: ProbeLimits,
) -> Result<ProbeResponse, reqwest::Error> {
    let response = client.get(url).header(ACCEPT, accept).send().await?;

    let reachable = response.status().is_success();
    let x_robots_tag = header_value(response.headers(), X_ROBOTS_TAG);

    if !reachable {
        tracing::debug!("{} returned {}", url, response.status());
    }

    let body = if reachable && read_body {
        match read_body_capped(response, limits.max_bytes).await {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                tracing::warn!("Could not read {}: {:?}", url, e);
                None
            }
        }
    } else {
        None
    };

    Ok(ProbeResponse {
        reachable,
        x_robots_tag,
        body,
    })
}

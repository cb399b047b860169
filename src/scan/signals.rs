use serde::Serialize;
use std::collections::BTreeSet;

/// Signals extracted from a single page's markup and response headers
///
/// Absent elements are represented as empty strings and zero counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSignals {
    pub title: String,
    pub description: String,
    /// Lowercase tokens from `<meta name="robots">` and the page's `X-Robots-Tag`
    pub robots_directives: BTreeSet<String>,
    pub canonical_url: String,
    /// Any `application/ld+json` block, parsable or not
    pub has_structured_data: bool,
    pub has_organization_schema: bool,
    pub has_website_schema: bool,
    pub h1_count: usize,
    pub h2_count: usize,
    pub word_count: usize,
    /// Unique same-origin `<a href>` targets
    pub internal_link_count: usize,
    pub html_lang: String,
    pub meta_lang: String,
}

/// Crawl-configuration signals gathered from the page's origin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSignals {
    pub robots_txt_reachable: bool,
    pub sitemap_reachable: bool,
    pub sitemap_referenced_in_robots: bool,
    /// `X-Robots-Tag` of the robots.txt response, else of the sitemap response
    pub x_robots_header: String,
    /// `Sitemap:` targets listed in robots.txt
    pub sitemap_urls: Vec<String>,
    /// AI crawler user agents that robots.txt disallows from the scanned page
    pub ai_crawlers_blocked: Vec<String>,
}

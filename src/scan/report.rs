use crate::scan::signals::{PageSignals, SiteSignals};
use crate::score::CheckItem;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of one scan
///
/// Serializes to the wire shape consumed by the presentation layer
/// (`url`, `finalUrl`, `score`, `checks`, `suggestions`, `heur`, `meta`). The
/// raw signals are kept for library callers but not serialized.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    #[serde(rename = "url")]
    pub requested_url: String,
    pub final_url: String,
    /// Weighted score, 0-100
    pub score: u8,
    #[serde(rename = "checks")]
    pub checklist: Vec<CheckItem>,
    pub suggestions: Vec<String>,
    pub scanned_at: DateTime<Utc>,
    pub heur: Heuristics,
    pub meta: PageMeta,
    #[serde(skip)]
    pub page: PageSignals,
    #[serde(skip)]
    pub site: SiteSignals,
}

/// Scoring inputs echoed back for display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Heuristics {
    pub word_count: usize,
    pub internal_links: usize,
    pub has_ld_any: bool,
    pub has_ld_organization: bool,
    #[serde(rename = "hasLdWebSite")]
    pub has_ld_website: bool,
    pub robots_txt_ok: bool,
    pub has_sitemap_file: bool,
    pub has_sitemap_ref_in_robots: bool,
    #[serde(rename = "xrobotsHeader")]
    pub x_robots_header: String,
    pub sitemap_urls: Vec<String>,
    pub ai_crawlers_blocked: Vec<String>,
}

impl Heuristics {
    pub fn from_signals(page: &PageSignals, site: &SiteSignals) -> Self {
        Self {
            word_count: page.word_count,
            internal_links: page.internal_link_count,
            has_ld_any: page.has_structured_data,
            has_ld_organization: page.has_organization_schema,
            has_ld_website: page.has_website_schema,
            robots_txt_ok: site.robots_txt_reachable,
            has_sitemap_file: site.sitemap_reachable,
            has_sitemap_ref_in_robots: site.sitemap_referenced_in_robots,
            x_robots_header: site.x_robots_header.clone(),
            sitemap_urls: site.sitemap_urls.clone(),
            ai_crawlers_blocked: site.ai_crawlers_blocked.clone(),
        }
    }
}

/// Response and document metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub final_url: String,
    pub content_type: String,
    pub content_language: String,
    pub html_lang: String,
    pub meta_lang: String,
    pub canonical: String,
    pub title: String,
    pub description: String,
    /// Encoding the body was decoded with
    pub charset: String,
}

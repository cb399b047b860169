//! The fixed checklist: check identifiers, weights, and per-check policy

use crate::scan::{parse_directives, PageSignals, SiteSignals};
use crate::score::{CheckItem, Status};
use serde::{Serialize, Serializer};

/// Directives that keep a page out of AI answers; `none` means `noindex,nofollow`
const BLOCKING_DIRECTIVES: &[&str] = &["noindex", "none", "nofollow"];

const TITLE_MAX_CHARS: usize = 70;
const DESCRIPTION_MAX_CHARS: usize = 180;
const COPY_GOOD_TOKENS: usize = 300;
const COPY_WARN_TOKENS: usize = 150;
const LINKS_GOOD: usize = 5;
const LINKS_WARN: usize = 2;
const SUBHEADINGS_GOOD: usize = 2;

/// Identifier of one checklist entry, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CheckKey {
    Title,
    Description,
    Robots,
    Canonical,
    StructuredData,
    Headings,
    Subheadings,
    CopyLength,
    InternalLinks,
    RobotsTxt,
    SitemapFile,
    SitemapReference,
}

impl CheckKey {
    /// Every check, in checklist order
    pub const ALL: [CheckKey; 12] = [
        CheckKey::Title,
        CheckKey::Description,
        CheckKey::Robots,
        CheckKey::Canonical,
        CheckKey::StructuredData,
        CheckKey::Headings,
        CheckKey::Subheadings,
        CheckKey::CopyLength,
        CheckKey::InternalLinks,
        CheckKey::RobotsTxt,
        CheckKey::SitemapFile,
        CheckKey::SitemapReference,
    ];

    /// Scoring weight of the check
    pub const fn weight(self) -> u32 {
        match self {
            CheckKey::Title => 10,
            CheckKey::Description => 7,
            CheckKey::Robots => 10,
            CheckKey::Canonical => 6,
            CheckKey::StructuredData => 8,
            CheckKey::Headings => 8,
            CheckKey::Subheadings => 4,
            CheckKey::CopyLength => 10,
            CheckKey::InternalLinks => 6,
            CheckKey::RobotsTxt => 5,
            CheckKey::SitemapFile => 5,
            CheckKey::SitemapReference => 3,
        }
    }

    /// Label used on the wire and in reports
    pub const fn label(self) -> &'static str {
        match self {
            CheckKey::Title => "Title",
            CheckKey::Description => "Description",
            CheckKey::Robots => "Robots (meta/header)",
            CheckKey::Canonical => "Canonical",
            CheckKey::StructuredData => "JSON-LD",
            CheckKey::Headings => "Headings",
            CheckKey::Subheadings => "Subheadings",
            CheckKey::CopyLength => "Copy length",
            CheckKey::InternalLinks => "Internal links",
            CheckKey::RobotsTxt => "robots.txt",
            CheckKey::SitemapFile => "Sitemap file",
            CheckKey::SitemapReference => "Sitemap reference",
        }
    }

    /// Remediation text shown when the check is not `good`
    pub const fn suggestion(self) -> &'static str {
        match self {
            CheckKey::Title => "Add a clear <title> (~60 chars).",
            CheckKey::Description => {
                "Provide a concise <meta name=\"description\"> (~150–160 chars)."
            }
            CheckKey::Robots => {
                "Check robots meta / X-Robots-Tag; avoid noindex/nofollow for key pages."
            }
            CheckKey::Canonical => "Declare an absolute canonical URL.",
            CheckKey::StructuredData => {
                "Add JSON-LD schema (Organization, WebSite) with sameAs links."
            }
            CheckKey::Headings => "Ensure exactly one <h1> and clear hierarchy.",
            CheckKey::Subheadings => "Split the copy into sections with descriptive <h2> headings.",
            CheckKey::CopyLength => "Add explanatory copy (≥ 300 words).",
            CheckKey::InternalLinks => "Add more same-origin internal links.",
            CheckKey::RobotsTxt => "Expose /robots.txt at the site root.",
            CheckKey::SitemapFile => "Expose /sitemap.xml at the site root.",
            CheckKey::SitemapReference => "Reference your sitemap(s) inside robots.txt.",
        }
    }

    /// Sum of all weights; the score's denominator
    pub const fn total_weight() -> u32 {
        let mut total = 0;
        let mut i = 0;
        while i < Self::ALL.len() {
            total += Self::ALL[i].weight();
            i += 1;
        }
        total
    }
}

impl Serialize for CheckKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Evaluates every check in order
pub fn build_checklist(page: &PageSignals, site: &SiteSignals) -> Vec<CheckItem> {
    CheckKey::ALL
        .iter()
        .map(|&key| {
            let (status, note) = evaluate_check(key, page, site);
            CheckItem::new(key, status, note)
        })
        .collect()
}

fn evaluate_check(key: CheckKey, page: &PageSignals, site: &SiteSignals) -> (Status, String) {
    match key {
        CheckKey::Title => check_title(&page.title),
        CheckKey::Description => check_description(&page.description),
        CheckKey::Robots => check_robots(page, site),
        CheckKey::Canonical => presence(
            !page.canonical_url.is_empty(),
            "Canonical declared.",
            "No canonical link.",
        ),
        CheckKey::StructuredData => check_structured_data(page),
        CheckKey::Headings => check_headings(page.h1_count),
        CheckKey::Subheadings => {
            if page.h2_count >= SUBHEADINGS_GOOD {
                (Status::Good, "Good structure.".to_string())
            } else {
                (Status::Warn, "Add more <h2> sections.".to_string())
            }
        }
        CheckKey::CopyLength => check_copy_length(page.word_count),
        CheckKey::InternalLinks => check_internal_links(page.internal_link_count),
        CheckKey::RobotsTxt => presence(
            site.robots_txt_reachable,
            "robots.txt present.",
            "robots.txt not reachable.",
        ),
        CheckKey::SitemapFile => presence(
            site.sitemap_reachable,
            "sitemap.xml present.",
            "sitemap.xml not reachable.",
        ),
        CheckKey::SitemapReference => presence(
            site.sitemap_referenced_in_robots,
            "robots.txt references Sitemap.",
            "Add 'Sitemap: …' line to robots.txt.",
        ),
    }
}

/// Present → good, absent → warn
fn presence(present: bool, good_note: &str, warn_note: &str) -> (Status, String) {
    if present {
        (Status::Good, good_note.to_string())
    } else {
        (Status::Warn, warn_note.to_string())
    }
}

fn check_title(title: &str) -> (Status, String) {
    if title.is_empty() {
        return (Status::Bad, "Missing <title>.".to_string());
    }
    let note = if title.chars().count() > TITLE_MAX_CHARS {
        "Present but long; aim ~60 chars."
    } else {
        "Present and concise."
    };
    (Status::Good, note.to_string())
}

fn check_description(description: &str) -> (Status, String) {
    if description.is_empty() {
        return (
            Status::Warn,
            "Meta description missing (og:/twitter:description used if available).".to_string(),
        );
    }
    let note = if description.chars().count() > DESCRIPTION_MAX_CHARS {
        "Present but long; aim ~150–160 chars."
    } else {
        "Present."
    };
    (Status::Good, note.to_string())
}

/// Returns true if the combined directives keep the page from being indexed or followed
pub fn is_blocked(page: &PageSignals, site: &SiteSignals) -> bool {
    let header = parse_directives(&site.x_robots_header);
    BLOCKING_DIRECTIVES
        .iter()
        .any(|directive| page.robots_directives.contains(*directive) || header.contains(*directive))
}

fn check_robots(page: &PageSignals, site: &SiteSignals) -> (Status, String) {
    if is_blocked(page, site) {
        (
            Status::Bad,
            "noindex/nofollow detected in meta or X-Robots-Tag.".to_string(),
        )
    } else {
        (Status::Good, "Indexable.".to_string())
    }
}

fn check_structured_data(page: &PageSignals) -> (Status, String) {
    if !page.has_structured_data {
        return (Status::Warn, "No JSON-LD schema.".to_string());
    }
    let note = if page.has_organization_schema || page.has_website_schema {
        "JSON-LD present (Organization/WebSite found)."
    } else {
        "JSON-LD present."
    };
    (Status::Good, note.to_string())
}

fn check_headings(h1_count: usize) -> (Status, String) {
    match h1_count {
        1 => (Status::Good, "Exactly one <h1>.".to_string()),
        0 => (Status::Bad, "No <h1>.".to_string()),
        n => (Status::Warn, format!("Multiple <h1> ({}).", n)),
    }
}

fn check_copy_length(word_count: usize) -> (Status, String) {
    if word_count >= COPY_GOOD_TOKENS {
        return (Status::Good, format!("~{} words.", word_count));
    }
    let status = if word_count >= COPY_WARN_TOKENS {
        Status::Warn
    } else {
        Status::Bad
    };
    (status, format!("Only ~{} words; aim ≥300.", word_count))
}

fn check_internal_links(count: usize) -> (Status, String) {
    if count >= LINKS_GOOD {
        return (Status::Good, format!("{} same-origin links.", count));
    }
    let status = if count >= LINKS_WARN {
        Status::Warn
    } else {
        Status::Bad
    };
    (
        status,
        format!("{} same-origin links; add more cross-linking.", count),
    )
}

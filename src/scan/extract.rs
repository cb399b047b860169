//! Pattern-based signal extraction
//!
//! Every rule is a separate function over the decoded markup returning an
//! optional value or a count. Missing elements never produce errors. The
//! extractor works on raw text through regular expressions and the tolerant
//! tag scanner in [`crate::scan::markup`]; it never builds a DOM.
//!
//! Head rules (title, meta tags, canonical) look at `<head>` when the
//! document has one and at the whole document otherwise.

use crate::scan::markup::{body_section, head_section, open_tags, Tag};
use crate::scan::signals::PageSignals;
use crate::url::{is_same_origin, resolve_href};
use regex::Regex;
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;
use url::Url;

static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("title regex is valid")
});

static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script\s*>").expect("script regex is valid")
});

/// Elements whose content is never visible copy
static INVISIBLE_BLOCKS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"(?is)<script\b.*?</script\s*>").expect("script strip regex is valid"),
        Regex::new(r"(?is)<style\b.*?</style\s*>").expect("style strip regex is valid"),
        Regex::new(r"(?is)<svg\b.*?</svg\s*>").expect("svg strip regex is valid"),
        Regex::new(r"(?s)<!--.*?-->").expect("comment strip regex is valid"),
    ]
});

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag strip regex is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Latin-script letters (including ğüşöçı and other extended Latin) and ASCII digits
static WORD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Latin}0-9]+").expect("word token regex is valid"));

const LD_JSON_TYPE: &str = "application/ld+json";

/// Structured-data findings from `application/ld+json` blocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructuredData {
    /// At least one block exists, parsable or not
    pub present: bool,
    pub organization: bool,
    pub website: bool,
}

/// Extracts all page signals
///
/// # Arguments
///
/// * `html` - Decoded page markup
/// * `base_url` - Final (post-redirect) page URL, used to resolve relative references
/// * `x_robots_tag` - The page response's `X-Robots-Tag` header, empty if absent
///
/// # Example
///
/// ```
/// use geolens::scan::extract_signals;
/// use url::Url;
///
/// let html = r#"<html lang="en"><head><title>Home</title></head><body><h1>Hi</h1></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let signals = extract_signals(html, &base_url, "");
/// assert_eq!(signals.title, "Home");
/// assert_eq!(signals.h1_count, 1);
/// assert_eq!(signals.html_lang, "en");
/// ```
pub fn extract_signals(html: &str, base_url: &Url, x_robots_tag: &str) -> PageSignals {
    let head = head_section(html).unwrap_or(html);
    let body = body_section(html).unwrap_or(html);
    let structured = extract_structured_data(html);

    PageSignals {
        title: extract_title(head).unwrap_or_default(),
        description: extract_description(head).unwrap_or_default(),
        robots_directives: extract_robots_directives(head, x_robots_tag),
        canonical_url: extract_canonical(head, base_url)
            .map(String::from)
            .unwrap_or_default(),
        has_structured_data: structured.present,
        has_organization_schema: structured.organization,
        has_website_schema: structured.website,
        h1_count: count_open_tags(html, "h1"),
        h2_count: count_open_tags(html, "h2"),
        word_count: count_words(&visible_text(body)),
        internal_link_count: count_internal_links(html, base_url),
        html_lang: extract_html_lang(html).unwrap_or_default(),
        meta_lang: extract_meta_lang(head).unwrap_or_default(),
    }
}

/// Text of the first `<title>`, trimmed
pub fn extract_title(head: &str) -> Option<String> {
    TITLE
        .captures(head)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// First non-empty `content` of a `<meta>` whose `key` attribute equals `value`
pub fn extract_meta_content(head: &str, key: &str, value: &str) -> Option<String> {
    open_tags(head, "meta")
        .filter(|tag| tag.attr_is(key, value))
        .filter_map(|tag| tag.attr("content"))
        .map(|content| content.trim().to_string())
        .find(|content| !content.is_empty())
}

/// `description`, then `og:description`, then `twitter:description`
pub fn extract_description(head: &str) -> Option<String> {
    extract_meta_content(head, "name", "description")
        .or_else(|| extract_meta_content(head, "property", "og:description"))
        .or_else(|| extract_meta_content(head, "name", "twitter:description"))
}

/// Splits a robots directive list such as `"noindex, nofollow, max-snippet:160"`
pub fn parse_directives(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(|part| part.trim().to_lowercase())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Union of `<meta name="robots">` and the page's `X-Robots-Tag` directives
pub fn extract_robots_directives(head: &str, x_robots_tag: &str) -> BTreeSet<String> {
    let mut directives = extract_meta_content(head, "name", "robots")
        .map(|content| parse_directives(&content))
        .unwrap_or_default();
    directives.extend(parse_directives(x_robots_tag));
    directives
}

/// `<link rel="canonical">` href as an absolute URL
pub fn extract_canonical(head: &str, base_url: &Url) -> Option<Url> {
    open_tags(head, "link")
        .filter(|tag| {
            tag.attr("rel").is_some_and(|rel| {
                rel.split_ascii_whitespace()
                    .any(|token| token.eq_ignore_ascii_case("canonical"))
            })
        })
        .find_map(|tag| tag.attr("href"))
        .and_then(|href| resolve_href(href, base_url))
}

/// Scans every `application/ld+json` block
///
/// A block that does not parse as JSON still counts as present but is
/// otherwise skipped; it never stops the other blocks from being read.
pub fn extract_structured_data(html: &str) -> StructuredData {
    let mut found = StructuredData::default();

    for caps in SCRIPT_BLOCK.captures_iter(html) {
        let tag = Tag::from_attrs(caps.get(1).map_or("", |m| m.as_str()));
        if !tag.attr_is("type", LD_JSON_TYPE) {
            continue;
        }
        found.present = true;

        let source = caps.get(2).map_or("", |m| m.as_str()).trim();
        let json: Value = match serde_json::from_str(source) {
            Ok(json) => json,
            Err(e) => {
                tracing::debug!("Ignoring unparsable JSON-LD block: {}", e);
                continue;
            }
        };

        for node in schema_nodes(&json) {
            let types = schema_type(node);
            found.organization |= types.contains("organization");
            found.website |= types.contains("website");
        }
    }

    found
}

/// Top-level nodes of a JSON-LD document
///
/// A document may be a single node, an array of nodes, or a node carrying an
/// `@graph` array; all of those are returned.
fn schema_nodes(json: &Value) -> Vec<&Value> {
    let roots: Vec<&Value> = match json {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    let mut nodes = Vec::with_capacity(roots.len());
    for root in roots {
        nodes.push(root);
        if let Some(Value::Array(graph)) = root.get("@graph") {
            nodes.extend(graph.iter());
        }
    }
    nodes
}

/// `@type` (or `type`) of a node, lower-cased; arrays are joined with commas
fn schema_type(node: &Value) -> String {
    let value = match node.get("@type") {
        Some(Value::Null) | None => node.get("type"),
        found => found,
    };

    match value {
        Some(Value::String(s)) => s.to_lowercase(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(",")
            .to_lowercase(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string().to_lowercase(),
    }
}

/// Number of opening tags called `name`
pub fn count_open_tags(html: &str, name: &str) -> usize {
    open_tags(html, name).count()
}

/// Visible copy: scripts, styles, inline SVG and comments removed, tags stripped, whitespace collapsed
pub fn visible_text(body: &str) -> String {
    let mut text = body.to_string();
    for pattern in INVISIBLE_BLOCKS.iter() {
        text = pattern.replace_all(&text, " ").into_owned();
    }
    let text = ANY_TAG.replace_all(&text, " ");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Word-like token count; a heuristic, not a linguistic word count
pub fn count_words(text: &str) -> usize {
    WORD_TOKEN.find_iter(text).count()
}

/// Unique `<a href>` targets sharing the page's origin
pub fn count_internal_links(html: &str, base_url: &Url) -> usize {
    open_tags(html, "a")
        .filter_map(|tag| tag.attr("href"))
        .filter_map(|href| resolve_href(href, base_url))
        .filter(|link| is_same_origin(link, base_url))
        .map(String::from)
        .collect::<HashSet<_>>()
        .len()
}

/// `<html lang>`, lower-cased
pub fn extract_html_lang(html: &str) -> Option<String> {
    open_tags(html, "html")
        .next()
        .and_then(|tag| tag.attr("lang"))
        .map(|lang| lang.trim().to_lowercase())
        .filter(|lang| !lang.is_empty())
}

/// `<meta http-equiv="content-language">`, else `<meta name="language">`
pub fn extract_meta_lang(head: &str) -> Option<String> {
    extract_meta_content(head, "http-equiv", "content-language")
        .or_else(|| extract_meta_content(head, "name", "language"))
}

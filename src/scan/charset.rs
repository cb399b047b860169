//! Character-encoding resolution and decoding
//!
//! The encoding is taken from, in order: the `charset=` parameter of the HTTP
//! `Content-Type` header, a `<meta charset>` tag, a
//! `<meta http-equiv="Content-Type">` tag, and finally UTF-8. Markup is
//! inspected through a lossy UTF-8 view of the `<head>` section. A label
//! `encoding_rs` does not recognize falls back to UTF-8; decoding itself never
//! fails and replaces malformed sequences with U+FFFD.

use crate::scan::markup::{head_section, open_tags};
use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// How many characters of a head-less document are searched for meta tags
const HEADLESS_PROBE_CHARS: usize = 4096;

static CHARSET_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^\s;"']+)"#).expect("charset regex is valid")
});

/// Where the encoding label came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharsetSource {
    /// `Content-Type: ...; charset=...` response header
    Header,
    /// `<meta charset="...">`
    MetaCharset,
    /// `<meta http-equiv="Content-Type" content="...; charset=...">`
    MetaHttpEquiv,
    /// Nothing declared
    Default,
    /// A label was declared but not recognized; UTF-8 was used instead
    Unrecognized(String),
}

/// The encoding chosen for a response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCharset {
    pub encoding: &'static Encoding,
    pub source: CharsetSource,
}

impl ResolvedCharset {
    /// WHATWG name of the encoding, e.g. `windows-1254`
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }
}

/// Picks the encoding for `raw` given the response `Content-Type` value
pub fn resolve_charset(raw: &[u8], content_type: &str) -> ResolvedCharset {
    let declared = header_charset(content_type)
        .map(|label| (label, CharsetSource::Header))
        .or_else(|| {
            let probe = String::from_utf8_lossy(raw);
            let head = markup_probe(&probe);
            meta_charset(head)
                .map(|label| (label, CharsetSource::MetaCharset))
                .or_else(|| {
                    http_equiv_charset(head).map(|label| (label, CharsetSource::MetaHttpEquiv))
                })
        });

    match declared {
        Some((label, source)) => match Encoding::for_label(label.as_bytes()) {
            Some(encoding) => ResolvedCharset { encoding, source },
            None => {
                tracing::warn!("Unrecognized charset '{}', decoding as UTF-8", label);
                ResolvedCharset {
                    encoding: UTF_8,
                    source: CharsetSource::Unrecognized(label),
                }
            }
        },
        None => ResolvedCharset {
            encoding: UTF_8,
            source: CharsetSource::Default,
        },
    }
}

/// Decodes `raw` with the resolved encoding
///
/// A byte-order mark, if present, overrides the resolved encoding.
pub fn decode(raw: &[u8], charset: &ResolvedCharset) -> String {
    let (text, _, had_errors) = charset.encoding.decode(raw);
    if had_errors {
        tracing::debug!(
            "Malformed {} sequences replaced while decoding",
            charset.name()
        );
    }
    text.into_owned()
}

/// Resolves the encoding and decodes in one step
pub fn decode_html(raw: &[u8], content_type: &str) -> (String, ResolvedCharset) {
    let charset = resolve_charset(raw, content_type);
    (decode(raw, &charset), charset)
}

fn header_charset(content_type: &str) -> Option<String> {
    capture_label(content_type)
}

fn meta_charset(head: &str) -> Option<String> {
    open_tags(head, "meta")
        .filter_map(|tag| tag.attr("charset"))
        .map(|label| label.trim().to_string())
        .find(|label| !label.is_empty())
}

fn http_equiv_charset(head: &str) -> Option<String> {
    open_tags(head, "meta")
        .filter(|tag| tag.attr_is("http-equiv", "content-type"))
        .filter_map(|tag| tag.attr("content"))
        .find_map(capture_label)
}

fn capture_label(value: &str) -> Option<String> {
    CHARSET_PARAM
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// The `<head>` contents, or the start of the document when there is no head
fn markup_probe(html: &str) -> &str {
    head_section(html).unwrap_or_else(|| match html.char_indices().nth(HEADLESS_PROBE_CHARS) {
        Some((end, _)) => &html[..end],
        None => html,
    })
}

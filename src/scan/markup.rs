//! Tolerant tag scanning shared by the charset resolver and signal extractor
//!
//! Nothing here builds a document tree. Opening tags are found by pattern,
//! and attributes are read from the raw tag source in any order and with any
//! quoting style.

use regex::Regex;
use std::sync::LazyLock;

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<([a-z][a-z0-9-]*)\b([^>]*)>").expect("open tag regex is valid")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("attribute regex is valid")
});

static HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<head\b[^>]*>(.*?)</head\s*>").expect("head regex is valid")
});

static BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<body\b[^>]*>(.*?)</body\s*>").expect("body regex is valid")
});

/// An opening tag and its raw attribute source
#[derive(Debug, Clone, Copy)]
pub struct Tag<'a> {
    attrs: &'a str,
}

impl<'a> Tag<'a> {
    /// Wraps attribute source captured by another pattern
    pub fn from_attrs(attrs: &'a str) -> Self {
        Self { attrs }
    }

    /// Value of the first attribute called `name` (ASCII case-insensitive)
    ///
    /// Boolean attributes yield an empty string.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        ATTRIBUTE.captures_iter(self.attrs).find_map(|caps| {
            let key = caps.get(1)?.as_str();
            if !key.eq_ignore_ascii_case(name) {
                return None;
            }
            Some(
                caps.get(2)
                    .or_else(|| caps.get(3))
                    .or_else(|| caps.get(4))
                    .map_or("", |m| m.as_str()),
            )
        })
    }

    /// Returns true if attribute `name` equals `value`, ignoring ASCII case and surrounding whitespace
    pub fn attr_is(&self, name: &str, value: &str) -> bool {
        self.attr(name)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case(value))
    }
}

/// All opening tags called `name`, in document order
pub fn open_tags<'a>(html: &'a str, name: &'a str) -> impl Iterator<Item = Tag<'a>> + 'a {
    OPEN_TAG.captures_iter(html).filter_map(move |caps| {
        let tag_name = caps.get(1)?.as_str();
        if !tag_name.eq_ignore_ascii_case(name) {
            return None;
        }
        Some(Tag {
            attrs: caps.get(2).map_or("", |m| m.as_str()),
        })
    })
}

/// Inner content of `<head>`, if the document has one
pub fn head_section(html: &str) -> Option<&str> {
    HEAD.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Inner content of `<body>`, if the document has one
pub fn body_section(html: &str) -> Option<&str> {
    BODY.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

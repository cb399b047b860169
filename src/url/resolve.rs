use url::Url;

/// Resolves an href (absolute or relative) against the page URL
///
/// Returns `None` for empty values and anything the URL parser rejects;
/// callers treat that as "no link" rather than an error.
pub fn resolve_href(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    base_url.join(href).ok()
}

/// ASCII serialization of the URL origin, e.g. `https://example.com:8443`
///
/// Default ports are omitted, matching what browsers report.
pub fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Returns true if both URLs share scheme, host and port
///
/// Opaque origins (`mailto:`, `javascript:`, `data:`) never match anything.
pub fn is_same_origin(a: &Url, b: &Url) -> bool {
    let origin = a.origin();
    origin.is_tuple() && origin == b.origin()
}

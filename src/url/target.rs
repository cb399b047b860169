use crate::UrlError;
use url::Url;

/// Validates a caller-supplied scan target and parses it
///
/// The raw string must start with `http://` or `https://` (any case) and parse
/// as an absolute URL with a host. Nothing is fetched here; rejection happens
/// before any network activity.
///
/// # Examples
///
/// ```
/// use geolens::url::parse_scan_url;
///
/// let url = parse_scan_url("  https://Example.com/page ").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
///
/// assert!(parse_scan_url("example.com").is_err());
/// assert!(parse_scan_url("ftp://example.com/").is_err());
/// ```
pub fn parse_scan_url(raw: &str) -> Result<Url, UrlError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(UrlError::Missing);
    }

    if !has_http_prefix(raw) {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS URLs can be scanned, got: {}",
            raw
        )));
    }

    let url = Url::parse(raw).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Case-insensitive `^https?://` check on the raw input
fn has_http_prefix(raw: &str) -> bool {
    ["http://", "https://"].iter().any(|prefix| {
        raw.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

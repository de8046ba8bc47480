use crate::UrlError;
use url::Url;

/// Scheme prepended to targets given without one
pub const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Normalizes a user-supplied analysis target into an absolute URL
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace; reject empty input
/// 2. Prepend `https://` when the input has no `http://` or `https://` prefix
/// 3. Parse the URL (WHATWG rules: lowercase host, empty path becomes `/`)
/// 4. Reject anything that is not HTTP(S) or has no host
///
/// An explicit `http://` scheme is preserved.
///
/// # Examples
///
/// ```
/// use alyze::url::normalize_target_url;
///
/// let url = normalize_target_url("example.com").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
///
/// let url = normalize_target_url("http://example.com").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/");
/// ```
pub fn normalize_target_url(input: &str) -> Result<Url, UrlError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlError::Empty);
    }

    let candidate = if has_http_scheme(input) {
        input.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, input)
    };

    let url = Url::parse(&candidate).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingDomain),
    }
}

fn has_http_scheme(input: &str) -> bool {
    let lower = input.get(..8).unwrap_or(input).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

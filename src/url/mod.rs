//! URL handling module for Alyze
//!
//! This module provides target URL normalization, domain extraction and the
//! same-origin checks shared by the extraction and scoring code.

mod domain;
mod normalize;

use url::Url;

// Re-export main functions
pub use domain::{extract_domain, has_suffix_in, longest_digit_run};
pub use normalize::{normalize_target_url, DEFAULT_SCHEME_PREFIX};

/// Resolves an `href`/`src`/`action` value against the page URL
///
/// Returns None if the reference should be ignored:
/// - empty values
/// - `javascript:`, `mailto:`, `tel:` and `data:` schemes
/// - fragment-only references (same page anchors)
/// - values that do not resolve to an HTTP(S) URL
pub fn resolve_reference(base: &Url, reference: &str) -> Option<Url> {
    let reference = reference.trim();

    if reference.is_empty() || reference.starts_with('#') {
        return None;
    }

    let lower = reference.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    match base.join(reference) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}

/// Returns true if the two URLs point at the same host (case-insensitive, port ignored)
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Returns true if `reference` resolves to an HTTP(S) URL on another host than `base`
///
/// Relative references are same-origin by definition; protocol-relative ones
/// (`//cdn.example.net/x.js`) are resolved against the page scheme.
pub fn is_cross_origin(base: &Url, reference: &str) -> bool {
    resolve_reference(base, reference)
        .map(|absolute| !same_host(base, &absolute))
        .unwrap_or(false)
}

//! Fetch error types and transport failure classification

use std::error::Error as StdError;
use std::io;
use thiserror::Error;
use url::Url;

/// Errors that end an analysis during the fetch phase
///
/// Responses with a status below 500 are not errors: 4xx pages are still
/// analyzed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("DNS resolution failed for {host}")]
    Dns { host: String },

    #[error("Connection refused by {host}")]
    ConnectionRefused { host: String },

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("TLS certificate expired for {host}")]
    CertificateExpired { host: String },

    #[error("TLS certificate not trusted for {host}")]
    CertificateUntrusted { host: String },

    #[error("Server responded with HTTP {status}")]
    ServerError { status: u16 },

    #[error("Too many redirects (limit {limit})")]
    TooManyRedirects { limit: usize },

    #[error("Request failed: {message}")]
    Generic { message: String },
}

impl FetchError {
    /// Message suitable for showing to the person who asked for the analysis
    pub fn user_message(&self) -> String {
        match self {
            Self::Dns { .. } => "Website not found (DNS)".to_string(),
            Self::ConnectionRefused { .. } => "Connection refused by the server".to_string(),
            Self::Timeout { seconds } => format!("Request timed out ({}s)", seconds),
            Self::CertificateExpired { .. } => "SSL certificate expired".to_string(),
            Self::CertificateUntrusted { .. } => "SSL certificate not valid".to_string(),
            Self::ServerError { status } => format!("Server error (HTTP {})", status),
            Self::TooManyRedirects { .. } => "Too many redirects".to_string(),
            Self::Generic { .. } => "Error while analyzing the site".to_string(),
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Dns { .. } => "ENOTFOUND",
            Self::ConnectionRefused { .. } => "ECONNREFUSED",
            Self::Timeout { .. } => "ETIMEDOUT",
            Self::CertificateExpired { .. } => "CERT_HAS_EXPIRED",
            Self::CertificateUntrusted { .. } => "UNABLE_TO_VERIFY_LEAF_SIGNATURE",
            Self::ServerError { .. } => "SERVER_ERROR",
            Self::TooManyRedirects { .. } => "TOO_MANY_REDIRECTS",
            Self::Generic { .. } => "FETCH_FAILED",
        }
    }
}

/// Classifies a `reqwest::Error` into a [`FetchError`]
///
/// reqwest does not expose DNS or certificate failures as distinct kinds, so
/// after the structured checks (timeout flag, wrapped `io::Error` kinds) the
/// full source chain is matched against known messages from hyper, rustls
/// and the system resolver.
pub fn classify_reqwest_error(error: &reqwest::Error, url: &Url, timeout_secs: u64) -> FetchError {
    if error.is_timeout() {
        return FetchError::Timeout {
            seconds: timeout_secs,
        };
    }

    let host = url.host_str().unwrap_or_default().to_string();

    match io_error_kind(error) {
        Some(io::ErrorKind::ConnectionRefused) => return FetchError::ConnectionRefused { host },
        Some(io::ErrorKind::TimedOut) => {
            return FetchError::Timeout {
                seconds: timeout_secs,
            }
        }
        _ => {}
    }

    classify_error_text(&error_chain_text(error), &host, timeout_secs)
}

/// Classifies a lowercase error chain description
pub fn classify_error_text(text: &str, host: &str, timeout_secs: u64) -> FetchError {
    let text = text.to_lowercase();
    let host = host.to_string();

    const DNS_MARKERS: &[&str] = &[
        "dns error",
        "failed to lookup address",
        "name or service not known",
        "nodename nor servname",
        "no such host",
    ];
    const UNTRUSTED_MARKERS: &[&str] = &[
        "unknownissuer",
        "unknown issuer",
        "invalid peer certificate",
        "certificate verify failed",
        "self signed",
        "self-signed",
        "unable to get local issuer",
    ];

    if DNS_MARKERS.iter().any(|marker| text.contains(marker)) {
        FetchError::Dns { host }
    } else if text.contains("connection refused") {
        FetchError::ConnectionRefused { host }
    } else if text.contains("certificate") && text.contains("expired") {
        FetchError::CertificateExpired { host }
    } else if UNTRUSTED_MARKERS.iter().any(|marker| text.contains(marker)) {
        FetchError::CertificateUntrusted { host }
    } else if text.contains("timed out") {
        FetchError::Timeout {
            seconds: timeout_secs,
        }
    } else {
        FetchError::Generic { message: text }
    }
}

/// Joins the Display output of an error and all of its sources
fn error_chain_text(error: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ")
}

/// Finds the first `io::Error` in the source chain
fn io_error_kind(error: &(dyn StdError + 'static)) -> Option<io::ErrorKind> {
    let mut source: Option<&(dyn StdError + 'static)> = Some(error);
    while let Some(inner) = source {
        if let Some(io_error) = inner.downcast_ref::<io::Error>() {
            return Some(io_error.kind());
        }
        source = inner.source();
    }
    None
}

//! Alyze: a single-page website analyzer
//!
//! This crate fetches one web page, parses its markup and derives independent
//! quality scores (SEO, accessibility, performance, security and suspicious-site
//! likelihood) from the document structure and the HTTP response metadata.
//! Results are kept for a short while in an in-process cache.

pub mod analysis;
pub mod analyzer;
pub mod cache;
pub mod config;
pub mod document;
pub mod fetch;
pub mod output;
pub mod state;
pub mod url;

use serde::Serialize;
use thiserror::Error;

pub use fetch::FetchError;

/// Main error type for Alyze operations
#[derive(Debug, Error)]
pub enum AlyzeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    InvalidUrl(#[from] UrlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::AnalysisStage,
        to: state::AnalysisStage,
    },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

impl AlyzeError {
    /// Message suitable for showing to the person who asked for the analysis
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidUrl(_) => "invalid URL".to_string(),
            Self::Fetch(e) => e.user_message(),
            Self::Config(_) => "Invalid analyzer configuration".to_string(),
            _ => "Error while analyzing the site".to_string(),
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "INVALID_URL",
            Self::Fetch(e) => e.code(),
            Self::Config(_) => "INVALID_CONFIG",
            Self::HttpClient(_) => "HTTP_CLIENT",
            Self::InvalidTransition { .. } => "INTERNAL",
            Self::Output(_) => "OUTPUT",
        }
    }

    /// Builds the error envelope returned to callers in place of a result
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            error: self.user_message(),
            details: self.to_string(),
            code: self.code().to_string(),
        }
    }
}

/// Error envelope: user-facing message, technical details and error code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub error: String,
    pub details: String,
    pub code: String,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("URL is empty")]
    Empty,

    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Markup that could not be interpreted as a document at all
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Body is not markup: {0}")]
    NotMarkup(String),
}

/// Result type alias for Alyze operations
pub type Result<T> = std::result::Result<T, AlyzeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analysis::{AnalysisOptions, AnalysisRequest, AnalysisResult, Level, ScoreReport};
pub use analyzer::Analyzer;
pub use cache::ResultCache;
pub use config::Config;
pub use document::Document;
pub use state::AnalysisStage;
pub use url::{extract_domain, normalize_target_url};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_error_report() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: AlyzeError = output::OutputError::from(io).into();

        let report = err.to_report();
        assert_eq!(report.code, "OUTPUT");
        assert_eq!(report.error, "Error while analyzing the site");
        assert_eq!(report.details, "Output error: IO error: read-only");
    }

    #[test]
    fn test_fetch_error_report_keeps_fetch_code() {
        let err = AlyzeError::from(FetchError::Timeout { seconds: 1 });
        assert_eq!(err.code(), "ETIMEDOUT");
        assert_eq!(err.user_message(), "Request timed out (1s)");
    }
}

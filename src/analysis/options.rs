//! Analysis request and options
//!
//! Options have exactly one canonical default (see [`AnalysisOptions::default`]).
//! Callers that supply only some fields get those fields merged over the
//! canonical default, whether they go through serde (missing keys take the
//! default) or through [`AnalysisOverrides::merge_over`].

use crate::fetch::{IdentityProfile, LocaleProfile};
use serde::{Deserialize, Serialize};

/// Language value meaning "detect from the document"
pub const AUTO_LANGUAGE: &str = "auto";

/// A single analysis request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub url: String,
    #[serde(default)]
    pub options: AnalysisOptions,
}

impl AnalysisRequest {
    /// Creates a request with the canonical default options
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            options: AnalysisOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }
}

/// Which analyses to run and how to fetch the page
///
/// JSON uses camelCase keys; configuration files may use kebab-case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisOptions {
    /// Requested language code, or "auto" to detect it
    pub language: String,

    /// Client identity used for the User-Agent header
    #[serde(alias = "identity-profile")]
    pub identity_profile: IdentityProfile,

    /// Simulated visitor locale
    #[serde(alias = "locale-profile")]
    pub locale_profile: LocaleProfile,

    #[serde(alias = "follow-redirects")]
    pub follow_redirects: bool,

    #[serde(alias = "detect-suspicious")]
    pub detect_suspicious: bool,

    #[serde(alias = "seo-analysis")]
    pub seo_analysis: bool,

    #[serde(alias = "performance-analysis")]
    pub performance_analysis: bool,

    #[serde(alias = "accessibility-analysis")]
    pub accessibility_analysis: bool,

    #[serde(alias = "security-analysis")]
    pub security_analysis: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            language: AUTO_LANGUAGE.to_string(),
            identity_profile: IdentityProfile::default(),
            locale_profile: LocaleProfile::default(),
            follow_redirects: true,
            detect_suspicious: true,
            seo_analysis: true,
            performance_analysis: true,
            accessibility_analysis: true,
            security_analysis: true,
        }
    }
}

impl AnalysisOptions {
    /// Returns true if the language should be detected from the document
    pub fn wants_language_detection(&self) -> bool {
        self.language.trim().is_empty() || self.language.eq_ignore_ascii_case(AUTO_LANGUAGE)
    }

    /// Disables every scoring module
    pub fn without_modules(mut self) -> Self {
        self.detect_suspicious = false;
        self.seo_analysis = false;
        self.performance_analysis = false;
        self.accessibility_analysis = false;
        self.security_analysis = false;
        self
    }

    /// Canonical form of the options: the language is trimmed and lowercased,
    /// and a blank language means "auto"
    ///
    /// The analyzer keys the cache and builds the envelope from this form, so
    /// a cached result only ever echoes the options it was computed with.
    pub fn normalized(mut self) -> Self {
        let language = self.language.trim().to_ascii_lowercase();
        self.language = if language.is_empty() {
            AUTO_LANGUAGE.to_string()
        } else {
            language
        };
        self
    }

    /// Deterministic serialization used in cache keys
    ///
    /// Field order is fixed, so equal options always produce equal strings.
    pub fn cache_fragment(&self) -> String {
        format!(
            "language={};identity={};locale={};redirects={};suspicious={};seo={};performance={};accessibility={};security={}",
            self.language,
            self.identity_profile.key(),
            self.locale_profile.key(),
            self.follow_redirects,
            self.detect_suspicious,
            self.seo_analysis,
            self.performance_analysis,
            self.accessibility_analysis,
            self.security_analysis,
        )
    }
}

/// A partial set of options, merged over a base set
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisOverrides {
    pub language: Option<String>,
    pub identity_profile: Option<IdentityProfile>,
    pub locale_profile: Option<LocaleProfile>,
    pub follow_redirects: Option<bool>,
    pub detect_suspicious: Option<bool>,
    pub seo_analysis: Option<bool>,
    pub performance_analysis: Option<bool>,
    pub accessibility_analysis: Option<bool>,
    pub security_analysis: Option<bool>,
}

impl AnalysisOverrides {
    /// Applies every field that is set on top of `base`
    pub fn merge_over(&self, base: &AnalysisOptions) -> AnalysisOptions {
        AnalysisOptions {
            language: self
                .language
                .clone()
                .unwrap_or_else(|| base.language.clone()),
            identity_profile: self.identity_profile.unwrap_or(base.identity_profile),
            locale_profile: self.locale_profile.unwrap_or(base.locale_profile),
            follow_redirects: self.follow_redirects.unwrap_or(base.follow_redirects),
            detect_suspicious: self.detect_suspicious.unwrap_or(base.detect_suspicious),
            seo_analysis: self.seo_analysis.unwrap_or(base.seo_analysis),
            performance_analysis: self
                .performance_analysis
                .unwrap_or(base.performance_analysis),
            accessibility_analysis: self
                .accessibility_analysis
                .unwrap_or(base.accessibility_analysis),
            security_analysis: self.security_analysis.unwrap_or(base.security_analysis),
        }
    }
}

//! The analysis result envelope

use crate::analysis::{
    AccessibilityReport, AnalysisOptions, PerformanceReport, SecurityReport, SeoReport,
    SuspiciousReport,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full outcome of one analysis
///
/// Module reports are present only when the corresponding option was enabled.
/// Missing page data (no title, no canonical...) is `None`, never a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Normalized requested URL
    pub url: String,
    /// URL of the analyzed response after redirects
    pub final_url: String,
    pub analysis_options: AnalysisOptions,
    pub status: u16,
    /// Elapsed fetch time in milliseconds
    pub response_time: u64,
    pub language: LanguageInfo,
    /// Body size in KiB, rounded
    pub html_size: u64,
    pub word_count: usize,
    pub title: Option<String>,
    pub title_length: usize,
    pub meta_description: Option<String>,
    pub meta_description_length: usize,
    pub meta_keywords: Option<String>,
    pub canonical: Option<String>,
    pub robots: Option<String>,
    pub headings: Headings,
    pub links: Links,
    pub media: Media,
    pub social_meta: SocialMeta,
    pub technologies: Vec<String>,
    pub headers: HeadersSummary,
    pub redirect_chain: Vec<String>,
    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspicious: Option<SuspiciousReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<AccessibilityReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
    pub detected: String,
    pub requested: String,
    /// Display name, None for unsupported codes
    pub name: Option<String>,
}

/// Trimmed text of every heading, per level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    pub h5: Vec<String>,
    pub h6: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
    /// The `href` value as written in the page
    pub url: String,
    pub text: String,
    pub title: Option<String>,
}

/// Link totals plus the first links of each kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Links {
    pub internal: usize,
    pub external: usize,
    pub internal_list: Vec<LinkInfo>,
    pub external_list: Vec<LinkInfo>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub images: usize,
    pub videos: usize,
    pub audios: usize,
    pub iframes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMeta {
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub twitter_card: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
}

/// Selected response headers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadersSummary {
    pub server: Option<String>,
    pub content_type: Option<String>,
    pub content_length: Option<String>,
    pub last_modified: Option<String>,
    pub etag: Option<String>,
    pub cache_control: Option<String>,
    pub expires: Option<String>,
    pub content_encoding: Option<String>,
    pub hsts: bool,
    pub csp: bool,
}

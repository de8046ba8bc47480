//! Analysis engine
//!
//! This module turns a parsed document plus the response metadata into:
//! - The base result envelope (title, headings, links, media, language...)
//! - Five independent score reports: SEO, accessibility, performance,
//!   security and suspicious-site likelihood
//!
//! Every scorer is a pure function of a [`PageContext`].

mod accessibility;
mod extract;
mod options;
mod performance;
mod report;
mod result;
pub mod rules;
mod security;
mod seo;
mod suspicious;

use crate::document::Document;
use crate::fetch::ResponseHeaders;
use crate::url::{extract_domain, is_cross_origin};
use url::Url;

pub use accessibility::{analyze_accessibility, AccessibilityDetails, AccessibilityReport};
pub use extract::{
    classify_link, detect_language, detect_technologies, extract_headings, extract_links,
    extract_media, extract_social_meta, html_size_kib, language_info, summarize_headers,
    word_count, LinkScope,
};
pub use options::{AnalysisOptions, AnalysisOverrides, AnalysisRequest, AUTO_LANGUAGE};
pub use performance::{analyze_performance, PerformanceDetails, PerformanceReport};
pub use report::{
    clamp_score, Level, LevelScale, ScoreReport, ScoreTally, SuspicionLevel,
    ACCESSIBILITY_SCALE, PERFORMANCE_SCALE, SECURITY_SCALE, SEO_SCALE,
};
pub use result::{
    AnalysisResult, Headings, HeadersSummary, LanguageInfo, LinkInfo, Links, Media, SocialMeta,
};
pub use security::{analyze_security, SecurityDetails, SecurityReport};
pub use seo::{analyze_seo, SeoDetails, SeoReport};
pub use suspicious::{detect_suspicious, SuspiciousDetails, SuspiciousReport};

/// Everything a scorer may look at for one page
#[derive(Clone, Copy)]
pub struct PageContext<'a> {
    pub document: &'a Document,
    /// Normalized URL the analysis was requested for
    pub url: &'a Url,
    pub headers: &'a ResponseHeaders,
    pub elapsed_ms: u64,
    pub redirect_count: usize,
}

impl<'a> PageContext<'a> {
    /// Returns true if the page URL uses HTTPS
    pub fn is_https(&self) -> bool {
        self.url.scheme() == "https"
    }

    /// Lowercase host of the page URL (empty if the URL has none)
    pub fn host(&self) -> String {
        extract_domain(self.url).unwrap_or_default()
    }

    /// Number of `<script src>` elements loaded from another host
    pub fn cross_origin_scripts(&self) -> usize {
        self.document
            .select("script[src]")
            .iter()
            .filter_map(|node| node.attr("src"))
            .filter(|src| is_cross_origin(self.url, src))
            .count()
    }
}

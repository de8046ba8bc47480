//! Assembly of the result envelope from a fetched and parsed page

use crate::analysis::{
    analyze_accessibility, analyze_performance, analyze_security, analyze_seo,
    detect_suspicious, detect_technologies, extract_headings, extract_links, extract_media,
    extract_social_meta, html_size_kib, language_info, summarize_headers, word_count,
    AnalysisOptions, AnalysisResult, PageContext,
};
use crate::document::Document;
use crate::fetch::FetchResult;
use chrono::Utc;
use std::panic::{catch_unwind, AssertUnwindSafe};
use url::Url;

/// Parses a response body, falling back to an empty document
///
/// A body that is not markup is logged and analyzed as an empty page.
pub fn parse_document(url: &Url, body: &str) -> Document {
    match Document::parse(body) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!("Could not parse {}: {}, analyzing an empty document", url, e);
            Document::empty()
        }
    }
}

/// Builds the full envelope and runs the enabled scorers
///
/// # Arguments
///
/// * `url` - The normalized requested URL
/// * `options` - Options of the request
/// * `fetched` - The fetch outcome
/// * `document` - The parsed body
pub fn build_result(
    url: &Url,
    options: &AnalysisOptions,
    fetched: &FetchResult,
    document: &Document,
) -> AnalysisResult {
    let ctx = PageContext {
        document,
        url,
        headers: &fetched.headers,
        elapsed_ms: fetched.elapsed_ms,
        redirect_count: fetched.redirect_count(),
    };

    let title = document.first_text("title");
    let meta_description = document.first_attr(r#"meta[name="description"]"#, "content");

    AnalysisResult {
        url: url.to_string(),
        final_url: fetched.final_url.to_string(),
        analysis_options: options.clone(),
        status: fetched.status,
        response_time: fetched.elapsed_ms,
        language: language_info(document, options),
        html_size: html_size_kib(&fetched.body),
        word_count: word_count(document),
        title_length: title.as_deref().map_or(0, |t| t.chars().count()),
        title,
        meta_description_length: meta_description.as_deref().map_or(0, |d| d.chars().count()),
        meta_description,
        meta_keywords: document.first_attr(r#"meta[name="keywords"]"#, "content"),
        canonical: document.first_attr(r#"link[rel="canonical"]"#, "href"),
        robots: document.first_attr(r#"meta[name="robots"]"#, "content"),
        headings: extract_headings(document),
        links: extract_links(document, url),
        media: extract_media(document),
        social_meta: extract_social_meta(document),
        technologies: detect_technologies(document, &fetched.headers),
        headers: summarize_headers(&fetched.headers),
        redirect_chain: fetched.redirect_chain.clone(),
        timestamp: Utc::now(),

        suspicious: run_module(options.detect_suspicious, "suspicious", || {
            detect_suspicious(&ctx)
        }),
        seo: run_module(options.seo_analysis, "seo", || analyze_seo(&ctx)),
        performance: run_module(options.performance_analysis, "performance", || {
            analyze_performance(&ctx)
        }),
        accessibility: run_module(options.accessibility_analysis, "accessibility", || {
            analyze_accessibility(&ctx)
        }),
        security: run_module(options.security_analysis, "security", || {
            analyze_security(&ctx)
        }),
    }
}

/// Runs one scorer if enabled, isolating panics
///
/// A panicking scorer is logged and left out of the result.
fn run_module<R>(enabled: bool, name: &str, scorer: impl FnOnce() -> R) -> Option<R> {
    if !enabled {
        return None;
    }

    match catch_unwind(AssertUnwindSafe(scorer)) {
        Ok(report) => Some(report),
        Err(_) => {
            tracing::error!("The {} module panicked and was left out of the result", name);
            None
        }
    }
}

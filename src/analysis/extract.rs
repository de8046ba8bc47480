//! Base envelope extraction
//!
//! Detectors that read facts off the page without scoring them: headings,
//! links, media, social tags, technologies, headers and language.

use crate::analysis::rules::{language_name, FALLBACK_LANGUAGE, LANGUAGE_HINTS, TECHNOLOGY_RULES};
use crate::analysis::{
    AnalysisOptions, Headings, HeadersSummary, LanguageInfo, LinkInfo, Links, Media, SocialMeta,
};
use crate::document::Document;
use crate::fetch::ResponseHeaders;
use crate::url::{resolve_reference, same_host};
use url::Url;

/// Internal links kept in the envelope
const MAX_INTERNAL_LINKS: usize = 50;

/// External links kept in the envelope
const MAX_EXTERNAL_LINKS: usize = 20;

/// Whether a link stays on the page host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkScope {
    Internal,
    External,
}

/// Classifies an `href` relative to the page URL
///
/// Returns None for links that lead nowhere on the web (anchors, `mailto:`,
/// `javascript:` and the like).
pub fn classify_link(page: &Url, href: &str) -> Option<LinkScope> {
    let target = resolve_reference(page, href)?;
    if same_host(page, &target) {
        Some(LinkScope::Internal)
    } else {
        Some(LinkScope::External)
    }
}

pub fn extract_headings(doc: &Document) -> Headings {
    Headings {
        h1: doc.texts("h1"),
        h2: doc.texts("h2"),
        h3: doc.texts("h3"),
        h4: doc.texts("h4"),
        h5: doc.texts("h5"),
        h6: doc.texts("h6"),
    }
}

/// Counts internal and external links and keeps the first of each
pub fn extract_links(doc: &Document, page: &Url) -> Links {
    let mut links = Links::default();

    for node in doc.select("a[href]") {
        let Some(href) = node.attr("href") else {
            continue;
        };
        let Some(scope) = classify_link(page, href) else {
            continue;
        };

        let info = || LinkInfo {
            url: href.to_string(),
            text: node.text(),
            title: node.attr("title").map(str::to_string),
        };

        match scope {
            LinkScope::Internal => {
                links.internal += 1;
                if links.internal_list.len() < MAX_INTERNAL_LINKS {
                    links.internal_list.push(info());
                }
            }
            LinkScope::External => {
                links.external += 1;
                if links.external_list.len() < MAX_EXTERNAL_LINKS {
                    links.external_list.push(info());
                }
            }
        }
    }

    links
}

pub fn extract_media(doc: &Document) -> Media {
    Media {
        images: doc.count("img"),
        videos: doc.count("video"),
        audios: doc.count("audio"),
        iframes: doc.count("iframe"),
    }
}

pub fn extract_social_meta(doc: &Document) -> SocialMeta {
    let property = |name: &str| doc.first_attr(&format!(r#"meta[property="{}"]"#, name), "content");
    let named = |name: &str| doc.first_attr(&format!(r#"meta[name="{}"]"#, name), "content");

    SocialMeta {
        og_title: property("og:title"),
        og_description: property("og:description"),
        og_image: property("og:image"),
        twitter_card: named("twitter:card"),
        twitter_title: named("twitter:title"),
        twitter_description: named("twitter:description"),
    }
}

/// Detects front-end libraries from markup, plus the `Server` header value
pub fn detect_technologies(doc: &Document, headers: &ResponseHeaders) -> Vec<String> {
    let mut technologies: Vec<String> = TECHNOLOGY_RULES
        .iter()
        .filter(|rule| {
            rule.signatures
                .iter()
                .any(|signature| doc.exists(&signature.selector()))
        })
        .map(|rule| rule.name.to_string())
        .collect();

    if let Some(server) = headers.get("server").filter(|s| !s.trim().is_empty()) {
        technologies.push(server.to_string());
    }

    technologies
}

pub fn summarize_headers(headers: &ResponseHeaders) -> HeadersSummary {
    let value = |name: &str| headers.get(name).map(str::to_string);

    HeadersSummary {
        server: value("server"),
        content_type: value("content-type"),
        content_length: value("content-length"),
        last_modified: value("last-modified"),
        etag: value("etag"),
        cache_control: value("cache-control"),
        expires: value("expires"),
        content_encoding: value("content-encoding"),
        hsts: headers.has("strict-transport-security"),
        csp: headers.has("content-security-policy"),
    }
}

/// Detects the page language
///
/// Checked in order:
/// 1. The `<html lang>` attribute
/// 2. `<meta http-equiv="content-language">`
/// 3. Stop-word frequency in the body text (French, English, Spanish)
///
/// Declared values are cut to their two-letter primary subtag.
pub fn detect_language(doc: &Document) -> String {
    if let Some(lang) = doc.root_attr("lang").and_then(|v| primary_subtag(&v)) {
        return lang;
    }

    let declared = doc
        .select("meta[http-equiv]")
        .into_iter()
        .filter(|node| {
            node.attr("http-equiv")
                .map(|v| v.trim().eq_ignore_ascii_case("content-language"))
                .unwrap_or(false)
        })
        .find_map(|node| node.attr("content").and_then(primary_subtag));
    if let Some(lang) = declared {
        return lang;
    }

    guess_language(&doc.body_text())
}

fn primary_subtag(value: &str) -> Option<String> {
    let code: String = value.trim().chars().take(2).collect::<String>().to_lowercase();
    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}

/// Stop-word heuristic over free text
fn guess_language(text: &str) -> String {
    let normalized = format!(
        " {} ",
        text.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    );

    let scores: Vec<(&str, usize)> = LANGUAGE_HINTS
        .iter()
        .map(|hint| {
            let hits = hint
                .words
                .iter()
                .filter(|word| normalized.contains(&format!(" {} ", word)))
                .count();
            (hint.code, hits)
        })
        .collect();

    let winner = scores.iter().find(|(code, hits)| {
        scores
            .iter()
            .all(|(other, other_hits)| other == code || hits > other_hits)
    });

    match winner {
        Some((code, _)) => code.to_string(),
        None => FALLBACK_LANGUAGE.to_string(),
    }
}

/// Resolves the language block of the envelope
///
/// An explicit language in the options bypasses detection.
pub fn language_info(doc: &Document, options: &AnalysisOptions) -> LanguageInfo {
    let detected = if options.wants_language_detection() {
        detect_language(doc)
    } else {
        options.language.trim().to_lowercase()
    };

    LanguageInfo {
        name: language_name(&detected).map(str::to_string),
        requested: options.language.clone(),
        detected,
    }
}

/// Whitespace-separated words of the body text
pub fn word_count(doc: &Document) -> usize {
    doc.body_text().split_whitespace().count()
}

/// Body size in KiB, rounded to the nearest integer
pub fn html_size_kib(body: &str) -> u64 {
    (body.len() as f64 / 1024.0).round() as u64
}

//! SEO scorer
//!
//! Additive: every rule met adds points, the total is capped at 100.

use crate::analysis::extract::{classify_link, LinkScope};
use crate::analysis::{PageContext, ScoreReport, ScoreTally, SEO_SCALE};
use serde::{Deserialize, Serialize};

pub type SeoReport = ScoreReport<SeoDetails>;

/// Raw measurements behind the SEO score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoDetails {
    pub title: Option<String>,
    pub title_length: usize,
    pub meta_description: Option<String>,
    pub meta_description_length: usize,
    pub h1_count: usize,
    pub h2_count: usize,
    pub h3_count: usize,
    pub images_total: usize,
    /// Images with a non-empty `alt`
    pub images_with_alt: usize,
    pub internal_links: usize,
    pub external_links: usize,
    pub canonical: Option<String>,
    pub has_open_graph: bool,
    pub has_twitter_card: bool,
    pub has_structured_data: bool,
    pub has_sitemap: bool,
}

/// Scores on-page SEO signals
///
/// # Arguments
///
/// * `ctx` - The page to score
///
/// # Returns
///
/// A report whose score starts at 0 and is capped at 100
pub fn analyze_seo(ctx: &PageContext<'_>) -> SeoReport {
    let doc = ctx.document;
    let mut tally = ScoreTally::starting_at(0.0);

    let title = doc.first_text("title");
    let title_length = title.as_deref().map(char_len).unwrap_or(0);
    match title_length {
        0 => tally.issue("Missing title, critical for SEO"),
        30..=60 => tally.reward(20.0, "Title length is optimal (30-60 characters)"),
        len => {
            tally.adjust(10.0);
            let verdict = if len < 30 { "too short" } else { "too long" };
            tally.issue(format!("Title {} ({} characters)", verdict, len));
        }
    }

    let meta_description = doc
        .first_attr(r#"meta[name="description"]"#, "content")
        .filter(|d| !d.is_empty());
    let meta_description_length = meta_description.as_deref().map(char_len).unwrap_or(0);
    match meta_description_length {
        0 => tally.issue("Missing meta description, important for search result snippets"),
        120..=160 => tally.reward(
            20.0,
            "Meta description length is optimal (120-160 characters)",
        ),
        len => {
            tally.adjust(10.0);
            let verdict = if len < 120 { "too short" } else { "too long" };
            tally.issue(format!("Meta description {} ({} characters)", verdict, len));
        }
    }

    let h1_count = doc.count("h1");
    let h2_count = doc.count("h2");
    let h3_count = doc.count("h3");
    match h1_count {
        1 => tally.reward(15.0, "Exactly one H1 heading"),
        0 => tally.issue("No H1 heading found, essential for page structure"),
        n => tally.issue(format!("Several H1 headings found ({}), one is recommended", n)),
    }
    if h2_count > 0 {
        tally.reward(10.0, format!("Good structure with H2 headings ({})", h2_count));
    }
    if h3_count > 0 {
        tally.reward(5.0, format!("Hierarchical structure with H3 headings ({})", h3_count));
    }

    let images = doc.select("img");
    let images_total = images.len();
    let images_with_alt = images
        .iter()
        .filter(|img| img.attr("alt").map(|alt| !alt.is_empty()).unwrap_or(false))
        .count();
    if images_total > 0 {
        let ratio = images_with_alt as f64 / images_total as f64 * 100.0;
        let percent = ratio.round();
        if ratio >= 90.0 {
            tally.reward(15.0, "Excellent use of alt attributes (>90%)");
        } else if ratio >= 70.0 {
            tally.reward(10.0, format!("Good use of alt attributes ({}%)", percent));
        } else if ratio >= 50.0 {
            tally.adjust(5.0);
            tally.issue(format!("Average use of alt attributes ({}%)", percent));
        } else {
            tally.issue(format!(
                "Poor use of alt attributes ({}%), needs improvement",
                percent
            ));
        }
    }

    let (internal_links, external_links) = count_links(ctx);
    if internal_links > 0 {
        tally.reward(10.0, format!("Internal linking present ({} links)", internal_links));
    } else {
        tally.issue("No internal links, internal linking is missing");
    }
    if external_links > 0 {
        tally.reward(5.0, format!("External links present ({})", external_links));
    }

    if let Some(robots) = doc.first_attr(r#"meta[name="robots"]"#, "content") {
        if robots.to_lowercase().contains("noindex") {
            tally.issue("Page blocked from indexing (noindex)");
        } else {
            tally.reward(5.0, "Meta robots configured correctly");
        }
    }

    let canonical = doc
        .first_attr(r#"link[rel="canonical"]"#, "href")
        .filter(|href| !href.trim().is_empty());
    if canonical.is_some() {
        tally.reward(5.0, "Canonical URL defined");
    } else {
        tally.issue("Missing canonical URL, risk of duplicate content");
    }

    let og = |property: &str| {
        doc.first_attr(&format!(r#"meta[property="{}"]"#, property), "content")
            .map(|v| !v.is_empty())
            .unwrap_or(false)
    };
    let (og_title, og_description, og_image) =
        (og("og:title"), og("og:description"), og("og:image"));
    let has_open_graph = og_title && og_description && og_image;
    if has_open_graph {
        tally.reward(10.0, "Complete Open Graph metadata");
    } else if og_title || og_description {
        tally.adjust(5.0);
        tally.issue("Partial Open Graph metadata");
    } else {
        tally.issue("Missing Open Graph metadata");
    }

    let has_twitter_card = doc
        .first_attr(r#"meta[name="twitter:card"]"#, "content")
        .map(|v| !v.is_empty())
        .unwrap_or(false);
    if has_twitter_card {
        tally.reward(5.0, "Twitter Card configured");
    }

    let has_structured_data = doc.exists(r#"script[type="application/ld+json"]"#);
    if has_structured_data {
        tally.reward(10.0, "Structured data detected (JSON-LD)");
    } else {
        tally.issue("Missing structured data, it improves search visibility");
    }

    let has_sitemap = doc.exists(r#"link[rel="sitemap"]"#);
    if has_sitemap {
        tally.reward(5.0, "Sitemap declared in the page");
    }

    tally.finish(
        &SEO_SCALE,
        SeoDetails {
            title,
            title_length,
            meta_description,
            meta_description_length,
            h1_count,
            h2_count,
            h3_count,
            images_total,
            images_with_alt,
            internal_links,
            external_links,
            canonical,
            has_open_graph,
            has_twitter_card,
            has_structured_data,
            has_sitemap,
        },
    )
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn count_links(ctx: &PageContext<'_>) -> (usize, usize) {
    ctx.document
        .select("a[href]")
        .iter()
        .filter_map(|node| node.attr("href"))
        .filter_map(|href| classify_link(ctx.url, href))
        .fold((0, 0), |(internal, external), scope| match scope {
            LinkScope::Internal => (internal + 1, external),
            LinkScope::External => (internal, external + 1),
        })
}

//! Performance scorer
//!
//! Starts at 100, loses points for slow responses and heavy pages, then gains
//! points for caching and compression headers. Clamped to 0..=100.

use crate::analysis::{PageContext, ScoreReport, ScoreTally, PERFORMANCE_SCALE};
use serde::{Deserialize, Serialize};

pub type PerformanceReport = ScoreReport<PerformanceDetails>;

const VERY_SLOW_MS: u64 = 3000;
const SLOW_MS: u64 = 1000;
const MAX_IMAGES: usize = 50;
const MAX_SCRIPTS: usize = 20;
const MAX_CROSS_ORIGIN_SCRIPTS: usize = 10;

/// Score below which generic compression and caching advice is added
const GENERIC_ADVICE_BELOW: u8 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceDetails {
    pub response_time: u64,
    pub images: usize,
    pub scripts: usize,
    pub stylesheets: usize,
    pub cross_origin_scripts: usize,
    pub has_compression: bool,
    pub has_caching: bool,
    pub recommendations: Vec<String>,
}

pub fn analyze_performance(ctx: &PageContext<'_>) -> PerformanceReport {
    let doc = ctx.document;
    let mut tally = ScoreTally::starting_at(100.0);
    let mut recommendations = Vec::new();

    let response_time = ctx.elapsed_ms;
    if response_time > VERY_SLOW_MS {
        tally.penalize(30.0, format!("Very slow response time ({} ms)", response_time));
        recommendations.push("Very slow response time (>3s), optimize the server".to_string());
    } else if response_time > SLOW_MS {
        tally.penalize(15.0, format!("Slow response time ({} ms)", response_time));
        recommendations.push("Slow response time (>1s), consider optimizing".to_string());
    } else {
        tally.good(format!("Fast response time ({} ms)", response_time));
    }

    let images = doc.count("img");
    if images > MAX_IMAGES {
        tally.penalize(10.0, format!("Many images ({})", images));
        recommendations.push(format!("Many images ({}), optimize and compress them", images));
    }

    let scripts = doc.count("script");
    if scripts > MAX_SCRIPTS {
        tally.penalize(10.0, format!("Too many scripts ({})", scripts));
        recommendations.push(format!("Too many scripts ({}), minify and bundle them", scripts));
    }

    let cross_origin_scripts = ctx.cross_origin_scripts();
    if cross_origin_scripts > MAX_CROSS_ORIGIN_SCRIPTS {
        tally.penalize(
            15.0,
            format!("Many cross-origin scripts ({})", cross_origin_scripts),
        );
        recommendations.push(format!(
            "Many cross-origin scripts ({}), reduce third-party dependencies",
            cross_origin_scripts
        ));
    }

    let has_caching = match header_value(ctx, "cache-control") {
        Some(cache_control) if cache_control.contains("max-age") => {
            tally.reward(20.0, "Cache-Control with max-age");
            true
        }
        Some(_) => {
            tally.reward(10.0, "Cache-Control header present");
            true
        }
        None => {
            tally.issue("No Cache-Control header");
            false
        }
    };

    let has_compression = match header_value(ctx, "content-encoding") {
        Some(encoding) if encoding.contains("gzip") || encoding.contains("br") => {
            tally.reward(20.0, format!("Compressed response ({})", encoding));
            true
        }
        Some(encoding) => {
            tally.reward(10.0, format!("Encoded response ({})", encoding));
            true
        }
        None => {
            tally.issue("Response is not compressed");
            false
        }
    };

    if tally.score() < GENERIC_ADVICE_BELOW {
        recommendations.push("Enable gzip/brotli compression".to_string());
        recommendations.push("Configure caching of static resources".to_string());
    }

    tally.finish(
        &PERFORMANCE_SCALE,
        PerformanceDetails {
            response_time,
            images,
            scripts,
            stylesheets: doc.count(r#"link[rel="stylesheet"]"#),
            cross_origin_scripts,
            has_compression,
            has_caching,
            recommendations,
        },
    )
}

/// Lowercased header value, None if absent or blank
fn header_value(ctx: &PageContext<'_>, name: &str) -> Option<String> {
    ctx.headers
        .get_lowercase(name)
        .filter(|value| !value.trim().is_empty())
}

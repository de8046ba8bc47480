//! Suspicious-site detector
//!
//! Additive: every indicator found raises the score. The higher the score,
//! the more the page looks like a throwaway or fraudulent site.

use crate::analysis::rules::{SUSPICIOUS_CORE_HEADERS, SUSPICIOUS_TLDS};
use crate::analysis::{PageContext, ScoreReport, ScoreTally, SuspicionLevel};
use crate::url::{has_suffix_in, longest_digit_run};
use serde::{Deserialize, Serialize};

/// Indicators are reported as issues; there are no good points
pub type SuspiciousReport = ScoreReport<SuspiciousDetails, SuspicionLevel>;

const MIN_HOST_LENGTH: usize = 5;
const MAX_DIGIT_RUN: usize = 3;
const MAX_REDIRECTS: usize = 5;
const MAX_CROSS_ORIGIN_SCRIPTS: usize = 15;
const MIN_PARAGRAPHS: usize = 5;
const MISSING_HEADERS_THRESHOLD: usize = 2;

/// Score above which a site is flagged
const SUSPICIOUS_ABOVE: u8 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspiciousDetails {
    pub is_suspicious: bool,
    pub domain: String,
    pub redirect_count: usize,
    pub cross_origin_scripts: usize,
    /// Display labels of the missing core security headers
    pub missing_security_headers: Vec<String>,
}

pub fn detect_suspicious(ctx: &PageContext<'_>) -> SuspiciousReport {
    let doc = ctx.document;
    let mut tally = ScoreTally::starting_at(0.0);
    let domain = ctx.host();

    if !ctx.is_https() {
        tally.adjust(30.0);
        tally.issue("No HTTPS, insecure connection");
    }

    if has_suffix_in(&domain, SUSPICIOUS_TLDS) {
        tally.adjust(25.0);
        tally.issue("Suspicious domain extension");
    }

    if domain.chars().count() < MIN_HOST_LENGTH || longest_digit_run(&domain) > MAX_DIGIT_RUN {
        tally.adjust(20.0);
        tally.issue("Suspicious domain name");
    }

    if ctx.redirect_count > MAX_REDIRECTS {
        tally.adjust(15.0);
        tally.issue(format!("Too many redirects ({})", ctx.redirect_count));
    }

    let cross_origin_scripts = ctx.cross_origin_scripts();
    if cross_origin_scripts > MAX_CROSS_ORIGIN_SCRIPTS {
        tally.adjust(20.0);
        tally.issue(format!("Many cross-origin scripts ({})", cross_origin_scripts));
    }

    let has_title = doc.first_text("title").is_some();
    if !has_title || doc.count("h1") == 0 || doc.count("p") < MIN_PARAGRAPHS {
        tally.adjust(15.0);
        tally.issue("Insufficient content structure");
    }

    let missing_security_headers: Vec<String> = SUSPICIOUS_CORE_HEADERS
        .iter()
        .filter(|(name, _)| !ctx.headers.has(name))
        .map(|(_, label)| label.to_string())
        .collect();
    if missing_security_headers.len() >= MISSING_HEADERS_THRESHOLD {
        tally.adjust(10.0);
        tally.issue(format!(
            "Missing security headers: {}",
            missing_security_headers.join(", ")
        ));
    }

    let is_suspicious = tally.score() > SUSPICIOUS_ABOVE;
    tally.finish_with(
        SuspicionLevel::for_score,
        SuspiciousDetails {
            is_suspicious,
            domain,
            redirect_count: ctx.redirect_count,
            cross_origin_scripts,
            missing_security_headers,
        },
    )
}

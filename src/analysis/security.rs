//! Security scorer
//!
//! Subtractive: starts at 100. Checks the transport, the security headers,
//! form targets and third-party scripts.

use crate::analysis::rules::SECURITY_HEADERS;
use crate::analysis::{PageContext, ScoreReport, ScoreTally, SECURITY_SCALE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type SecurityReport = ScoreReport<SecurityDetails>;

/// Cross-origin scripts tolerated before the score drops
const MAX_CROSS_ORIGIN_SCRIPTS: usize = 5;

/// Ceiling of the cross-origin script penalty
const MAX_SCRIPT_PENALTY: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityDetails {
    /// URL scheme, e.g. "https"
    pub protocol: String,
    /// Presence of each checked header, keyed by lowercase name
    pub security_headers: BTreeMap<String, bool>,
    pub insecure_forms: usize,
    pub cross_origin_scripts: usize,
}

pub fn analyze_security(ctx: &PageContext<'_>) -> SecurityReport {
    let mut tally = ScoreTally::starting_at(100.0);

    if ctx.is_https() {
        tally.good("Secure HTTPS connection");
    } else {
        tally.penalize(30.0, "Insecure site (HTTP instead of HTTPS)");
    }

    let mut security_headers = BTreeMap::new();
    for rule in SECURITY_HEADERS {
        let present = ctx.headers.has(rule.name);
        if present {
            tally.good(format!("{} enabled", rule.description));
        } else {
            tally.penalize(10.0, format!("{} missing", rule.description));
        }
        security_headers.insert(rule.name.to_string(), present);
    }

    let insecure_forms = count_insecure_forms(ctx);
    if insecure_forms > 0 {
        tally.penalize(
            insecure_forms as f64 * 15.0,
            format!("{} form(s) submitting over an insecure connection", insecure_forms),
        );
    }

    let cross_origin_scripts = ctx.cross_origin_scripts();
    if cross_origin_scripts > MAX_CROSS_ORIGIN_SCRIPTS {
        tally.penalize(
            (cross_origin_scripts as f64 * 2.0).min(MAX_SCRIPT_PENALTY),
            format!("{} cross-origin scripts, security risk", cross_origin_scripts),
        );
    }

    tally.finish(
        &SECURITY_SCALE,
        SecurityDetails {
            protocol: ctx.url.scheme().to_string(),
            security_headers,
            insecure_forms,
            cross_origin_scripts,
        },
    )
}

/// Forms whose resolved target is not HTTPS
///
/// A missing or empty `action` submits to the page itself.
fn count_insecure_forms(ctx: &PageContext<'_>) -> usize {
    ctx.document
        .select("form")
        .iter()
        .filter(|form| {
            let action = form.attr("action").map(str::trim).unwrap_or("");
            if action.is_empty() {
                return !ctx.is_https();
            }
            match ctx.url.join(action) {
                Ok(target) => target.scheme() != "https",
                Err(_) => true,
            }
        })
        .count()
}

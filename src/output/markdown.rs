//! Markdown report generation
//!
//! This module generates human-readable markdown reports of one analysis,
//! including the page overview, the score table and the findings of every
//! module that ran.

use crate::analysis::{AnalysisResult, ScoreReport};
use crate::ErrorReport;
use std::fmt::Display;

/// Formats an analysis result as markdown
///
/// # Arguments
///
/// * `result` - The analysis result
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_report(result: &AnalysisResult) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Alyze Report: {}\n\n", result.url));

    // Page overview
    md.push_str("## Page Information\n\n");
    if result.final_url != result.url {
        md.push_str(&format!("- **Final URL**: {}\n", result.final_url));
    }
    md.push_str(&format!("- **Status**: {}\n", result.status));
    md.push_str(&format!("- **Response Time**: {} ms\n", result.response_time));
    md.push_str(&format!(
        "- **Language**: {}\n",
        result
            .language
            .name
            .as_deref()
            .unwrap_or(&result.language.detected)
    ));
    md.push_str(&format!("- **HTML Size**: {} KB\n", result.html_size));
    md.push_str(&format!("- **Word Count**: {}\n", result.word_count));
    if let Some(title) = &result.title {
        md.push_str(&format!("- **Title**: {}\n", title));
    }
    if let Some(description) = &result.meta_description {
        md.push_str(&format!("- **Description**: {}\n", description));
    }
    md.push_str(&format!(
        "- **Links**: {} internal, {} external\n",
        result.links.internal, result.links.external
    ));
    if !result.technologies.is_empty() {
        md.push_str(&format!(
            "- **Technologies**: {}\n",
            result.technologies.join(", ")
        ));
    }
    md.push_str(&format!(
        "- **Analyzed At**: {}\n\n",
        result.timestamp.to_rfc3339()
    ));

    if !result.redirect_chain.is_empty() {
        md.push_str("## Redirect Chain\n\n");
        for (i, hop) in result.redirect_chain.iter().enumerate() {
            md.push_str(&format!("{}. {}\n", i + 1, hop));
        }
        md.push('\n');
    }

    // Score table
    let mut rows = Vec::new();
    if let Some(seo) = &result.seo {
        rows.push(("SEO", seo.score, seo.level.to_string()));
    }
    if let Some(accessibility) = &result.accessibility {
        rows.push((
            "Accessibility",
            accessibility.score,
            accessibility.level.to_string(),
        ));
    }
    if let Some(performance) = &result.performance {
        rows.push((
            "Performance",
            performance.score,
            performance.level.to_string(),
        ));
    }
    if let Some(security) = &result.security {
        rows.push(("Security", security.score, security.level.to_string()));
    }
    if let Some(suspicious) = &result.suspicious {
        rows.push(("Suspicious", suspicious.score, suspicious.level.to_string()));
    }

    if !rows.is_empty() {
        md.push_str("## Scores\n\n");
        md.push_str("| Module | Score | Level |\n");
        md.push_str("|--------|-------|-------|\n");
        for (module, score, level) in rows {
            md.push_str(&format!("| {} | {} | {} |\n", module, score, level));
        }
        md.push('\n');
    }

    // Findings per module
    if let Some(seo) = &result.seo {
        push_findings(&mut md, "SEO", seo);
    }
    if let Some(accessibility) = &result.accessibility {
        push_findings(&mut md, "Accessibility", accessibility);
    }
    if let Some(performance) = &result.performance {
        push_findings(&mut md, "Performance", performance);
        push_list(
            &mut md,
            "Recommendations",
            &performance.details.recommendations,
        );
    }
    if let Some(security) = &result.security {
        push_findings(&mut md, "Security", security);
    }
    if let Some(suspicious) = &result.suspicious {
        push_findings(&mut md, "Suspicious Indicators", suspicious);
    }

    md
}

/// Formats a failed analysis as markdown
pub fn format_markdown_error(target: &str, report: &ErrorReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Alyze Report: {}\n\n", target));
    md.push_str("## Analysis Failed\n\n");
    md.push_str(&format!("- **Error**: {}\n", report.error));
    md.push_str(&format!("- **Code**: {}\n", report.code));
    md.push_str(&format!("- **Details**: {}\n", report.details));

    md
}

fn push_findings<D, L: Display>(md: &mut String, name: &str, report: &ScoreReport<D, L>) {
    md.push_str(&format!(
        "## {} ({}/100, {})\n\n",
        name, report.score, report.level
    ));

    if report.issues.is_empty() && report.good_points.is_empty() {
        md.push_str("No findings.\n\n");
        return;
    }

    push_list(md, "Issues", &report.issues);
    push_list(md, "Good Points", &report.good_points);
}

fn push_list(md: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }

    md.push_str(&format!("### {}\n\n", heading));
    for item in items {
        md.push_str(&format!("- {}\n", item));
    }
    md.push('\n');
}

//! Accessibility scorer
//!
//! Subtractive: starts at 100 and loses points per barrier found.

use crate::analysis::rules::LOW_CONTRAST_COLORS;
use crate::analysis::{PageContext, ScoreReport, ScoreTally, ACCESSIBILITY_SCALE};
use crate::document::{Document, Node};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub type AccessibilityReport = ScoreReport<AccessibilityDetails>;

/// Input types that never need a visible label
const UNLABELED_INPUT_TYPES: &[&str] = &["hidden", "submit", "button", "reset"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityDetails {
    pub images_total: usize,
    /// Images with no `alt` attribute at all (`alt=""` counts as present)
    pub images_without_alt: usize,
    pub links_without_text: usize,
    pub h1_count: usize,
    pub inputs_without_label: usize,
    pub has_low_contrast: bool,
    pub has_lang: bool,
}

pub fn analyze_accessibility(ctx: &PageContext<'_>) -> AccessibilityReport {
    let doc = ctx.document;
    let mut tally = ScoreTally::starting_at(100.0);

    let images = doc.select("img");
    let images_total = images.len();
    let images_without_alt = images.iter().filter(|img| !img.has_attr("alt")).count();
    if images_without_alt > 0 {
        tally.penalize(
            images_without_alt as f64 / images_total as f64 * 20.0,
            format!(
                "{} of {} images have no alt attribute",
                images_without_alt, images_total
            ),
        );
    } else if images_total > 0 {
        tally.good("Every image has an alt attribute");
    }

    let links_without_text = doc
        .select("a")
        .iter()
        .filter(|link| is_textless_link(link))
        .count();
    if links_without_text > 0 {
        tally.penalize(
            links_without_text as f64 * 5.0,
            format!("{} links without descriptive text", links_without_text),
        );
    }

    let h1_count = doc.count("h1");
    match h1_count {
        0 => tally.penalize(15.0, "No H1 heading found"),
        1 => tally.good("Heading structure is correct (one H1)"),
        n => tally.penalize(
            10.0,
            format!("Several H1 headings found ({}), one is recommended", n),
        ),
    }

    let inputs_without_label = count_unlabeled_inputs(doc);
    if inputs_without_label > 0 {
        tally.penalize(
            inputs_without_label as f64 * 10.0,
            format!("{} form fields without a label", inputs_without_label),
        );
    }

    let has_low_contrast = doc
        .select("[style]")
        .iter()
        .filter_map(|node| node.attr("style"))
        .any(has_low_contrast_color);
    if has_low_contrast {
        tally.penalize(10.0, "Elements with potentially low contrast detected");
    }

    let has_lang = doc
        .root_attr("lang")
        .map(|lang| !lang.trim().is_empty())
        .unwrap_or(false);
    if has_lang {
        tally.good("Document language is declared");
    } else {
        tally.penalize(10.0, "Missing lang attribute on the html element");
    }

    tally.finish(
        &ACCESSIBILITY_SCALE,
        AccessibilityDetails {
            images_total,
            images_without_alt,
            links_without_text,
            h1_count,
            inputs_without_label,
            has_low_contrast,
            has_lang,
        },
    )
}

/// A link with no child element, no text and no `aria-label`
fn is_textless_link(link: &Node<'_>) -> bool {
    let labelled = link
        .attr("aria-label")
        .map(|label| !label.trim().is_empty())
        .unwrap_or(false);
    !link.has_element_children() && link.text().is_empty() && !labelled
}

fn count_unlabeled_inputs(doc: &Document) -> usize {
    let label_targets: HashSet<&str> = doc
        .select("label[for]")
        .iter()
        .filter_map(|label| label.attr("for"))
        .collect();

    doc.select("input")
        .iter()
        .filter(|input| {
            let kind = input.attr("type").unwrap_or("text").trim().to_ascii_lowercase();
            !UNLABELED_INPUT_TYPES.contains(&kind.as_str())
        })
        .filter(|input| !input.has_attr("aria-label") && !input.has_attr("aria-labelledby"))
        .filter(|input| match input.attr("id") {
            Some(id) if !id.is_empty() => !label_targets.contains(id),
            _ => true,
        })
        .count()
}

/// Returns true if an inline style sets `color` to a low-contrast value
fn has_low_contrast_color(style: &str) -> bool {
    style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .filter(|(property, _)| property.trim().eq_ignore_ascii_case("color"))
        .any(|(_, value)| {
            let value = value.trim().to_ascii_lowercase();
            let value = value.trim_end_matches("!important").trim();
            LOW_CONTRAST_COLORS.contains(&value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::Fixture;
    use crate::analysis::Level;

    fn analyze(html: &str) -> AccessibilityReport {
        let fixture = Fixture::new("https://example.com/", html);
        analyze_accessibility(&fixture.context())
    }

    #[test]
    fn test_clean_document_is_perfect() {
        let report = analyze(
            r#"<html lang="en"><body>
                <h1>Welcome</h1>
                <img src="a.png" alt="A photo">
                <a href="/about">About us</a>
                <a href="/home"><img src="logo.png" alt="Home"></a>
                <label for="email">Email</label><input id="email" type="email">
                <input type="submit" value="Send">
            </body></html>"#,
        );

        assert_eq!(report.score, 100);
        assert_eq!(report.level, Level::Excellent);
        assert!(report.issues.is_empty());
        assert_eq!(
            report.good_points,
            vec![
                "Every image has an alt attribute",
                "Heading structure is correct (one H1)",
                "Document language is declared",
            ]
        );
    }

    #[test]
    fn test_missing_alt_is_proportional() {
        let report = analyze(
            r#"<html lang="en"><body><h1>T</h1>
                <img src="1"><img src="2" alt=""><img src="3" alt="x"><img src="4" alt="y">
            </body></html>"#,
        );
        assert_eq!(report.score, 95);
        assert_eq!(report.issues, vec!["1 of 4 images have no alt attribute"]);
        assert_eq!(report.details.images_without_alt, 1);
    }

    #[test]
    fn test_textless_links() {
        let report = analyze(
            r#"<html lang="en"><body><h1>T</h1>
                <a href="/a"></a>
                <a href="/b">   </a>
                <a href="/c" aria-label="Close"></a>
                <a href="/d"><span></span></a>
            </body></html>"#,
        );
        assert_eq!(report.details.links_without_text, 2);
        assert_eq!(report.score, 90);
    }

    #[test]
    fn test_heading_penalties() {
        let none = analyze(r#"<html lang="en"><body></body></html>"#);
        assert_eq!(none.score, 85);
        assert_eq!(none.issues, vec!["No H1 heading found"]);

        let several = analyze(r#"<html lang="en"><body><h1>A</h1><h1>B</h1></body></html>"#);
        assert_eq!(several.score, 90);
    }

    #[test]
    fn test_unlabeled_inputs() {
        let report = analyze(
            r#"<html lang="en"><body><h1>T</h1>
                <input type="text" name="q">
                <input id="orphan">
                <input aria-label="Search">
                <input aria-labelledby="lbl">
                <input type="hidden" name="token">
                <input type="button" value="Go">
                <input type="RESET">
            </body></html>"#,
        );
        assert_eq!(report.details.inputs_without_label, 2);
        assert_eq!(report.score, 80);
    }

    #[test]
    fn test_low_contrast_penalized_once() {
        let report = analyze(
            r#"<html lang="en"><body><h1>T</h1>
                <p style="color: #999">faint</p>
                <p style="font-size: 12px; COLOR: Gray !important">faint</p>
                <p style="background-color: gray">not text colour</p>
            </body></html>"#,
        );
        assert!(report.details.has_low_contrast);
        assert_eq!(report.score, 90);
    }

    #[test]
    fn test_background_color_alone_is_not_low_contrast() {
        assert!(!has_low_contrast_color("background-color: #ccc"));
        assert!(!has_low_contrast_color("color: #333"));
        assert!(has_low_contrast_color("color:#ccc;"));
    }

    #[test]
    fn test_missing_lang() {
        let report = analyze("<html><body><h1>T</h1></body></html>");
        assert_eq!(report.score, 90);
        assert_eq!(
            report.issues,
            vec!["Missing lang attribute on the html element"]
        );
    }

    #[test]
    fn test_score_never_negative() {
        let mut html = String::from("<html><body>");
        for _ in 0..30 {
            html.push_str("<input><a href='/x'></a>");
        }
        html.push_str("</body></html>");
        let report = analyze(&html);
        assert_eq!(report.score, 0);
        assert_eq!(report.level, Level::Low);
    }
}

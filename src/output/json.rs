//! JSON rendering of results and error envelopes

use crate::analysis::AnalysisResult;
use crate::output::OutputResult;
use crate::ErrorReport;

/// Renders a result as pretty-printed JSON
pub fn render_json(result: &AnalysisResult) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Renders an error envelope as pretty-printed JSON
pub fn render_error_json(report: &ErrorReport) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Renders the outcomes of several analyses
///
/// A single outcome is rendered as one object, several as an array in the
/// given order.
pub fn render_json_batch(outcomes: &[Result<AnalysisResult, ErrorReport>]) -> OutputResult<String> {
    if let [single] = outcomes {
        return match single {
            Ok(result) => render_json(result),
            Err(report) => render_error_json(report),
        };
    }

    let values = outcomes
        .iter()
        .map(|outcome| match outcome {
            Ok(result) => serde_json::to_value(result),
            Err(report) => serde_json::to_value(report),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::to_string_pretty(&values)?)
}

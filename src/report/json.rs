//! JSON rendering

use crate::analysis::AnalysisReport;

/// Pretty-printed JSON document of the full report
pub fn render_json(report: &AnalysisReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

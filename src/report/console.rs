//! Plain-text report for the terminal

use crate::analysis::{
    AnalysisReport, AssumptionCheck, BackupComparison, Hypothesis, HypothesisResult, Outcome,
    TestSelection, WalletSummary, WalletTypeComparison,
};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use usability_polars::{HEURISTICS, TASK_MEAN, WALLET};

/// Printed under H3
pub const INDEPENDENCE_CAVEAT: &str = "Note: the Mann-Whitney U test assumes independent samples, \
     but the same wallet may be rated under both conditions.";

/// Render the whole report in presentation order
pub fn render_console(report: &AnalysisReport) -> String {
    let mut lines = Vec::new();

    lines.push(heading(Hypothesis::H1));
    lines.push(wallet_table(&report.wallet_summary).to_string());

    lines.push(heading(Hypothesis::H2));
    lines.extend(wallet_type_lines(&report.wallet_type));

    for comparison in [&report.backup_prompt, &report.backup_validation] {
        lines.push(heading(comparison.condition.hypothesis()));
        lines.extend(backup_lines(comparison));
    }
    lines.push(String::new());
    lines.push(INDEPENDENCE_CAVEAT.to_string());

    lines.join("\n")
}

/// Grid table of the wallet-level averages
pub fn wallet_table(summary: &[WalletSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new(WALLET)];
    header.extend(HEURISTICS.iter().map(|h| Cell::new(h)));
    header.push(Cell::new(TASK_MEAN));
    table.set_header(header);

    for row in summary {
        let mut cells = vec![Cell::new(&row.wallet)];
        cells.extend(row.heuristics.iter().map(|v| Cell::new(v)));
        cells.push(Cell::new(row.task_mean));
        table.add_row(cells);
    }
    table
}

fn heading(hypothesis: Hypothesis) -> String {
    format!("\n--- {} ---", hypothesis.title())
}

fn wallet_type_lines(comparison: &WalletTypeComparison) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(match &comparison.normality {
        AssumptionCheck::Passed { p_values } | AssumptionCheck::Rejected { p_values } => {
            let parts: Vec<String> = p_values
                .iter()
                .map(|g| format!("{}={:.3}", abbreviation(&g.group), g.p_value))
                .collect();
            format!("Shapiro-Wilk p-values: {}", parts.join(", "))
        }
        check => check_notice(check),
    });

    lines.push(match &comparison.homogeneity {
        AssumptionCheck::Passed { p_values } | AssumptionCheck::Rejected { p_values } => {
            let p = p_values.first().map_or(f64::NAN, |g| g.p_value);
            format!("Levene's test p-value: {p:.3}")
        }
        check => check_notice(check),
    });

    lines.push(match comparison.selection {
        TestSelection::ParametricEligible => "Using ANOVA (assumptions met)".to_string(),
        TestSelection::NonParametricRequired | TestSelection::InsufficientData => {
            "Assumptions not met → Using Kruskal-Wallis".to_string()
        }
    });
    lines.push(result_line(&comparison.result, 3));
    lines
}

fn backup_lines(comparison: &BackupComparison) -> Vec<String> {
    comparison
        .results
        .iter()
        .map(|result| format!("{}: {}", result.label, result_line(result, 2)))
        .collect()
}

fn result_line(result: &HypothesisResult, statistic_decimals: usize) -> String {
    // H3 lines are already labelled with the heuristic
    let named = result.hypothesis == Hypothesis::H2;
    match (&result.outcome, result.statistic, result.p_value, result.verdict) {
        (Outcome::Completed { .. }, Some(statistic), Some(p), Some(verdict)) => {
            let symbol = result.test.statistic_symbol();
            let prefix = if named {
                format!("{} ", result.test.name())
            } else {
                String::new()
            };
            format!("{prefix}{symbol}={statistic:.statistic_decimals$}, p={p:.4} ({verdict})")
        }
        (Outcome::Skipped { reason }, ..) if named => {
            format!("{}: not enough data ({reason})", result.test.name())
        }
        (Outcome::Skipped { reason }, ..) => format!("not enough data ({reason})"),
        (Outcome::Failed { group, message }, ..) => {
            format!("{} could not be evaluated for {group}: {message}", result.test.name())
        }
        _ => format!("{} produced no result", result.test.name()),
    }
}

fn check_notice(check: &AssumptionCheck) -> String {
    match check {
        AssumptionCheck::NotTested { notice } => notice.clone(),
        AssumptionCheck::Failed {
            test,
            group,
            message,
        } => format!("{test} could not be evaluated for {group}: {message}"),
        AssumptionCheck::Passed { .. } | AssumptionCheck::Rejected { .. } => String::new(),
    }
}

fn abbreviation(group: &str) -> &str {
    match group {
        "Hardware" => "HW",
        "Software" => "SW",
        "Custodial" => "CU",
        other => other,
    }
}

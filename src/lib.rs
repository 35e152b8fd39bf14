//! Wallet usability analysis
//!
//! Reads the heuristic-evaluation export of a cryptocurrency-wallet
//! usability experiment and reports four hypotheses:
//!
//! - **H1**: per-wallet averages of the eight heuristics and the task mean
//! - **H2**: whether task scores differ by wallet type, with ANOVA or
//!   Kruskal-Wallis chosen from normality and variance checks
//! - **H3a / H3b**: whether prompting for / validating a backup shifts the
//!   G1 and G5 scores (Mann-Whitney U)
//!
//! # Example
//!
//! ```rust,no_run
//! use wallet_usability::{analyze, render_console, AnalysisConfig};
//!
//! let report = analyze(&AnalysisConfig::default())?;
//! println!("{}", render_console(&report));
//! # Ok::<(), wallet_usability::Error>(())
//! ```

pub mod analysis;
pub mod config;
pub mod report;

pub use analysis::{
    run_analysis, AnalysisReport, Hypothesis, HypothesisResult, Outcome, TestSelection, Verdict,
};
pub use config::AnalysisConfig;
pub use report::{render_console, render_json};

// Re-export workspace crates
pub use usability_core;
pub use usability_inference;
pub use usability_polars;
pub use usability_polars::{Dataset, Error, LoadOptions, Result};

/// Load `config.input` and run every analysis on it
pub fn analyze(config: &AnalysisConfig) -> Result<AnalysisReport> {
    config.validate()?;
    let data = Dataset::load(&config.input, &config.load)?;
    run_analysis(&data, config)
}

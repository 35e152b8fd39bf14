//! Presentation of an [`AnalysisReport`](crate::AnalysisReport)

mod console;
mod json;

pub use console::{render_console, wallet_table, INDEPENDENCE_CAVEAT};
pub use json::render_json;

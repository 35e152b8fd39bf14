use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wallet_usability::{analyze, render_console, AnalysisConfig};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the report
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AnalysisConfig::default();
    info!(input = %config.input.display(), "starting analysis");

    let report = analyze(&config)
        .with_context(|| format!("failed to analyse {}", config.input.display()))?;
    println!("{}", render_console(&report));
    Ok(())
}

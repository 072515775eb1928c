use anyhow::{Context, Result};
use clap::Parser;
use indicator_scraper::{
    assemble::assemble,
    config::Config,
    fetch::HttpPageFetcher,
    persist::{persist, PersistOutcome},
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) configuration ────────────────────────────────────────────
    let config = Config::parse();
    info!(
        output = %config.output.display(),
        format = ?config.format,
        base_url = %config.base_url,
        "startup"
    );

    let catalog = config
        .load_catalog()
        .context("loading indicator catalog")?;
    info!("{} indicators in catalog", catalog.len());

    // ─── 3) fetch & merge ────────────────────────────────────────────
    let fetcher = HttpPageFetcher::new(config.fetch_settings())?;
    let merged = assemble(&fetcher, &catalog, &config.assemble_options()).await;
    if merged.is_none() {
        warn!("catalog produced no table");
    }

    // ─── 4) persist ──────────────────────────────────────────────────
    match persist(merged.as_ref(), &config.output, config.format)? {
        PersistOutcome::Written { rows } => {
            info!(rows, path = %config.output.display(), "all done")
        }
        PersistOutcome::Skipped => info!("all done; no output written"),
    }
    Ok(())
}

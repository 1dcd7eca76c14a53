mod backend;
mod config;
mod console;
mod downloads;
mod errors;
mod models;
mod session;
#[cfg(test)]
mod testing;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend::HttpBackend;
use crate::config::Config;
use crate::downloads::DownloadDir;
use crate::session::Orchestrator;
use crate::ui::TerminalUi;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr so they never interleave with tables on stdout.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));
    info!("Backend: {}", config.api_url);

    let backend = HttpBackend::from_config(&config).context("Failed to build HTTP client")?;
    let downloads = DownloadDir::new(config.download_dir.clone());
    info!("Downloads go to {}", downloads.path().display());

    let ui = Arc::new(TerminalUi::new());
    let mut orchestrator = Orchestrator::new(Box::new(backend), ui.clone(), downloads);

    orchestrator.start().await;
    console::run(&mut orchestrator, &ui).await?;

    info!("Bye");
    Ok(())
}

mod bootstrap;

use std::sync::Arc;

use anyhow::{Context, Result};
use pulse_core::settings::Settings;
use pulse_data::reader::Dataset;
use pulse_runtime::dashboard::Dashboard;
use pulse_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Slack Pulse v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Workspace: {}, Theme: {}",
        settings.workspace_label,
        settings.theme
    );

    let data_dir = settings
        .data_dir
        .clone()
        .or_else(bootstrap::discover_data_path)
        .context("no data directory found; pass --data-dir or create ./info")?;

    // Fail fast: a missing or malformed input file aborts startup.
    let dataset = Dataset::load(&data_dir)
        .with_context(|| format!("failed to load dashboard data from {}", data_dir.display()))?;

    let dashboard = Arc::new(Dashboard::new(
        Arc::new(dataset),
        &settings.workspace_label,
    ));
    let app = App::new(&settings.theme, dashboard, settings.workspace_label.clone());

    // Run the TUI event loop. The loop exits on 'q' / Ctrl+C inside the TUI.
    // We also listen for Ctrl+C at the OS level so that signals received
    // while the terminal is in raw mode are handled cleanly.
    tokio::select! {
        result = app.run() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down");
        }
    }

    Ok(())
}

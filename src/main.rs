//! DoctorEveryWhere - homepage hero with image slider and quick booking
//!
//! Main entry point for the console application.
//!
//! # Overview
//!
//! This binary crate renders the homepage hero in the terminal. It initializes:
//! - Configuration loading ([`ConfigManager`])
//! - Logging infrastructure (daily file rotation + optional stderr output)
//! - Tokio async runtime (current thread; timer and HTTP are both I/O bound)
//! - State management ([`StateManager`])
//! - Console controller ([`ConsoleController`] - wires stdin commands to the services)
//!
//! # Execution Flow
//!
//! 1. Load `DoctorEveryWhere Data/Hero Config.yaml` (defaults if absent)
//! 2. Initialize logging → logs/doctoreverywhere.<date>
//! 3. Create tokio runtime
//! 4. Create StateManager and the booking transport
//! 5. Run the console controller until `quit` or end of input
//! 6. Log the metrics summary and shut down the runtime

use anyhow::Result;
use doctoreverywhere::services::{HttpBookingTransport, LogLinkOpener};
use doctoreverywhere::ui::ConsoleController;
use doctoreverywhere::{APP_NAME, ConfigManager, Metrics, StateManager, VERSION};
use std::sync::Arc;
use std::time::Duration;

/// Directory holding `Hero Config.yaml`
const CONFIG_DIR: &str = "DoctorEveryWhere Data";

fn main() -> Result<()> {
    let config_manager = ConfigManager::new(CONFIG_DIR)?;
    let config = config_manager.load_hero_config()?;

    // Guard must live until exit so buffered log lines are flushed
    let _log_guard = doctoreverywhere::logging::setup_logging(&config.logging, APP_NAME)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    tracing::info!(
        "Loaded configuration - slides: {}, interval: {}ms, endpoint: {}",
        config.slider.slides.len(),
        config.slider.interval_ms,
        config.booking.endpoint_url()
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .thread_name("doctoreverywhere")
        .build()?;

    tracing::info!("Tokio runtime initialized");

    let state_manager = StateManager::new();
    let metrics = Arc::new(Metrics::new());

    let result = runtime.block_on(async {
        let transport = Arc::new(HttpBookingTransport::new(&config.booking)?);
        let controller = ConsoleController::new(
            state_manager.clone(),
            &config,
            transport,
            Arc::new(LogLinkOpener),
            Arc::clone(&metrics),
        )?;

        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        controller.run(stdin).await
    });

    tracing::info!("Console closed, shutting down");
    metrics.log_summary();

    runtime.shutdown_timeout(Duration::from_secs(5));

    tracing::info!("Application shutdown complete");

    result.map_err(|e| {
        tracing::error!("Console error: {:#}", e);
        e
    })
}

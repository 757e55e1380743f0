// Main entry point - Dependency wiring and report output
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tracing_subscriber::EnvFilter;

use milk_quality::application::classification_service::ClassificationService;
use milk_quality::application::dashboard_service::DashboardService;
use milk_quality::infrastructure::config::load_monitor_config;
use milk_quality::infrastructure::json_repository::JsonFileRepository;
use milk_quality::presentation::report::DashboardReport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays a clean JSON document
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = load_monitor_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(JsonFileRepository::new(config.source.path.clone()));
    tracing::info!("Reading milk samples from {}", repository.path().display());

    // Create services (application layer)
    let classification = ClassificationService::new(repository);
    let dashboard = DashboardService::new(
        classification,
        config.dashboard.clone(),
        config.aggregation.clone(),
    )?;

    let report = DashboardReport::build(&dashboard, Utc::now()).await?;
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize dashboard report")?;
    println!("{}", json);

    Ok(())
}

mod check;

use clap::Parser;
use stockwatch_core::{load_app_config, load_settings, AppConfig, CheckRecorder, Settings};
use stockwatch_notify::send_report;
use tracing_subscriber::EnvFilter;

/// Runs one stock check and reports it. Takes no options: everything comes
/// from the environment and the settings file.
#[derive(Debug, Parser)]
#[command(name = "stockwatch")]
#[command(version, about = "Check a product page for stock and notify the operator")]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _cli = Cli::parse();

    let (config, config_error) = match load_app_config() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    init_tracing(&config.log_level);
    if let Some(e) = config_error {
        tracing::error!(error = %e, "invalid environment configuration; using defaults");
    }
    tracing::debug!(?config, "configuration loaded");

    let mut recorder = CheckRecorder::new();
    let settings = match load_settings(&config.settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            recorder.error(format!("Failed to load settings: {e}"));
            Settings::default()
        }
    };

    let mut outcome = check::run_check(&settings, &config, recorder).await;
    let delivery = send_report(&mut outcome, &settings, &config).await;

    tracing::info!(
        result = %outcome.result(),
        stage = %outcome.stage(),
        text_sent = delivery.text_sent,
        email_sent = delivery.email_sent,
        log_written = delivery.log_written,
        "stock check complete"
    );
}

fn init_tracing(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

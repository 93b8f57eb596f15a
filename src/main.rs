mod analytics;
mod api;
mod config;
mod generator;
mod models;
mod simulation;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analytics::aggregator::compute_statistics;
use crate::api::routes::AppState;
use crate::api::server::ConsoleApiServer;
use crate::config::settings::Settings;
use crate::generator::attack::generate_attacks;
use crate::models::webapp::{builtin_templates, get_template};
use crate::simulation::feed::{ActivityFeed, LoginFeed};
use crate::simulation::server::HoneypotSim;

const LOGIN_FEED_SEED: usize = 10;

/// Parse the `--config` CLI flag. Defaults to `config/honeytrap.toml`.
fn parse_config_path() -> String {
    let args: Vec<String> = std::env::args().collect();
    let mut config_path = String::from("config/honeytrap.toml");

    let mut i = 1;
    while i < args.len() {
        if args[i] == "--config" {
            if let Some(path) = args.get(i + 1) {
                config_path = path.clone();
            }
            i += 2;
        } else {
            i += 1;
        }
    }

    config_path
}

/// Initialise the `tracing` subscriber with both stdout and file output.
fn init_tracing(log_dir: &str) {
    let _ = std::fs::create_dir_all(log_dir);

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(format!("{}/honeytrap.log", log_dir))
        .expect("Failed to open log file");

    let file_layer = fmt::layer()
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,honeytrap=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ---------------------------------------------------------------
    // 1. Configuration
    // ---------------------------------------------------------------
    let config_path = parse_config_path();
    let settings = if std::path::Path::new(&config_path).exists() {
        Settings::load(&config_path)?
    } else {
        Settings::default()
    };
    let settings = Arc::new(settings);

    // ---------------------------------------------------------------
    // 2. Logging
    // ---------------------------------------------------------------
    let log_dir = std::path::Path::new(&settings.logging.file)
        .parent()
        .and_then(|p| p.to_str())
        .unwrap_or("logs")
        .to_string();
    init_tracing(&log_dir);

    info!("Starting Honeytrap simulation console");
    info!("Config loaded from {}", config_path);

    // ---------------------------------------------------------------
    // 3. Initial dataset
    //
    // Generated once here and owned by the composition root; the feeds and
    // the API hold shared read-only views of it. Nothing is persisted.
    // ---------------------------------------------------------------
    let dataset = Arc::new(generate_attacks(settings.simulation.initial_attacks));
    let stats = compute_statistics(&dataset);
    info!(
        "Generated {} synthetic attacks from {} unique IPs ({:.1}% marked successful)",
        stats.total_attempts,
        stats.unique_ips,
        stats.success_rate()
    );

    // ---------------------------------------------------------------
    // 4. Simulation feeds
    // ---------------------------------------------------------------
    let activity = Arc::new(ActivityFeed::new(
        dataset.as_ref().clone(),
        settings.simulation.feed_capacity,
    ));
    let logins = Arc::new(LoginFeed::seeded(
        LOGIN_FEED_SEED,
        settings.simulation.feed_capacity,
    ));

    let template = get_template(&settings.honeypot.template).unwrap_or_else(|| {
        warn!(
            "Unknown template '{}' in config, falling back to the first built-in",
            settings.honeypot.template
        );
        builtin_templates().remove(0)
    });
    info!("Emulating application template: {}", template.name);

    let honeypot = Arc::new(HoneypotSim::new(
        template,
        &settings.honeypot,
        settings.simulation.log_capacity,
    ));

    // ---------------------------------------------------------------
    // 5. Console API
    // ---------------------------------------------------------------
    let state = AppState {
        settings: settings.clone(),
        dataset: dataset.clone(),
        activity: activity.clone(),
        logins: logins.clone(),
        server: honeypot.clone(),
        start_time: Instant::now(),
        api_key: settings.api.api_key.clone(),
    };

    let api_bind = settings.api.bind.clone();
    let api_server = ConsoleApiServer::new(state, api_bind.clone());
    info!("Console API will listen on {}", api_bind);

    // ---------------------------------------------------------------
    // 6. Spawn everything
    // ---------------------------------------------------------------
    let activity_period = Duration::from_secs(settings.simulation.activity_interval_secs);
    let login_period = Duration::from_secs(settings.simulation.login_interval_secs);
    let attack_min = settings.simulation.attack_min_interval_secs;
    let attack_max = settings.simulation.attack_max_interval_secs;

    let activity_handle = tokio::spawn({
        let activity = activity.clone();
        async move { activity.run(activity_period).await }
    });

    let login_handle = tokio::spawn({
        let logins = logins.clone();
        async move { logins.run(login_period).await }
    });

    let honeypot_handle = tokio::spawn({
        let honeypot = honeypot.clone();
        async move { honeypot.run(attack_min, attack_max).await }
    });

    let api_handle = tokio::spawn(async move {
        if let Err(e) = api_server.run().await {
            error!("Console API server error: {}", e);
        }
    });

    info!("Honeytrap is running. Press Ctrl+C to shut down.");

    // ---------------------------------------------------------------
    // 7. Wait for shutdown signal
    // ---------------------------------------------------------------
    tokio::signal::ctrl_c().await?;
    info!("Shutting down Honeytrap...");

    // Cancel background tasks. The feeds hold no external resources, so an
    // abort is a clean teardown.
    activity_handle.abort();
    login_handle.abort();
    honeypot_handle.abort();
    api_handle.abort();

    info!("Honeytrap shut down gracefully");
    Ok(())
}

use std::sync::Arc;
use std::time::Duration;

use efootball_server_rs::api::Api;
use efootball_server_rs::config_handler;
use efootball_server_rs::fixture_service::FixtureService;
use efootball_server_rs::match_service::{MatchService, SafeMatchService};
use efootball_server_rs::rest_client::RestClient;
use tokio::time::MissedTickBehavior;
use tracing::log;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        // Set the RUST_LOG, if it hasn't been explicitly defined
        std::env::set_var("RUST_LOG", "info")
    }

    // Configure a custom event formatter
    let format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_target(false)
        .with_ansi(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .compact();
    tracing_subscriber::fmt()
        .event_format(format)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = config_handler::get_config()?;
    let match_service = MatchService::new();
    let fixture_service = Arc::new(FixtureService::new(RestClient::new(&config)?));

    {
        let match_service = match_service.clone();
        let poll_interval = config.poll_interval();
        tokio::spawn(async move { handle_loop(fixture_service, match_service, poll_interval).await });
    }

    Api::serve(config.port, match_service, &config.static_dir).await
}

/// Starts a fetch cycle on every tick without waiting for the previous one.
async fn handle_loop(
    fixture_service: Arc<FixtureService>,
    match_service: SafeMatchService,
    poll_interval: Duration,
) {
    log::info!("[POLL] Refresh every {:?}", poll_interval);
    let mut interval = tokio::time::interval(poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let (fixture_service, match_service) = (fixture_service.clone(), match_service.clone());
        tokio::spawn(async move {
            fixture_service.update(&match_service).await;
        });
    }
}

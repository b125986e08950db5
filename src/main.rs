use drift_review::host::DocClient;
use drift_review::ui::{make_config, AppContext};
use drift_review::{ui::App, Config};
use tracing::{error, info};

fn main() {
    // Use RUST_LOG env var if set, otherwise default to info level
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(log_filter).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let client = match DocClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Cannot reach {}: {}", config.site_url, e);
            std::process::exit(1);
        }
    };

    info!(
        "Starting Drift Review against {} ({} player)",
        client.site_url(),
        config.surface
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_config())
        .with_context(AppContext { config, client })
        .launch(App);
}

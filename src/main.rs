use picto_search::config::Config;
use picto_search::ui::{make_config, App};
use picto_search::AppContext;
use tracing::{error, info};

fn main() {
    // Use RUST_LOG env var if set, otherwise default to info level
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(log_filter).init();

    let config = Config::load();

    let app_context = match AppContext::new(config) {
        Ok(context) => context,
        Err(e) => {
            error!("Failed to create search client: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting picto search against {}", app_context.config.api_base_url);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_config())
        .with_context(app_context)
        .launch(App);
}

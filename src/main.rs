//! FreshFold gateway entry point
//!
//! Startup order: config, logging, seed directory, serve.

use std::sync::Arc;

use freshfold::catalog::Catalog;
use freshfold::config::AppConfig;
use freshfold::directory::Directory;
use freshfold::gateway::{self, state::AppState};
use freshfold::logging::init_logging;
use freshfold::service::OrderLifecycleService;

fn config_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--env" && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "default".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = config_env();
    let config = AppConfig::load(&env).unwrap_or_else(|e| {
        eprintln!("{}; falling back to built-in defaults", e);
        AppConfig::default()
    });

    let _guard = init_logging(&config);
    tracing::info!(env = %env, "starting freshfold gateway");

    let directory = Arc::new(Directory::with_seed_data());
    tracing::info!("directory seeded with stock personnel roster");

    let service = Arc::new(OrderLifecycleService::new(directory, Catalog::default()));
    let state = Arc::new(AppState::new(service));

    gateway::run_server(&config.gateway.host, config.gateway.port, state).await
}

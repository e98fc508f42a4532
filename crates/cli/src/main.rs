mod menu;
mod metrics;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{self, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use powerball_core::{
    load_config_or_default, validate_config, Lottery, LotteryStore, SqliteLotteryStore,
};

use menu::Menu;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Logs go to stderr, the menu owns stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine config path
    let config_path = std::env::var("POWERBALL_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("powerball.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Database path: {:?}", config.database.path);
    info!("Recurrence limit: {}", config.lottery.recurrence_limit);

    // Open the store; an unusable database file degrades to a session that
    // does not persist
    let store: Arc<dyn LotteryStore> = match SqliteLotteryStore::new(&config.database.path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(
                "Database {:?} unavailable, state will not be kept: {}",
                config.database.path, e
            );
            Arc::new(SqliteLotteryStore::in_memory().context("Failed to open in-memory store")?)
        }
    };

    let mut lottery = Lottery::open(store, &config).context("Failed to open lottery session")?;
    info!("Powerball v{} ready", VERSION);

    let mut menu = Menu::new(BufReader::new(io::stdin()), io::stdout());
    menu.run(&mut lottery)
        .await
        .context("Failed to run command menu")?;

    info!("Session ended with {} tickets", lottery.ticket_count());
    Ok(())
}

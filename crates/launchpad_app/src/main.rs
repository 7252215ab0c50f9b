mod render;

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};

use launchpad_core::logging::init_logging;
use launchpad_core::{KeyValueStore, LaunchpadConfig, MemoryStore, SqliteStore};
use launchpad_data::Catalog;
use launchpad_ui::Route;
use launchpad_wallet::WalletSession;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

/// SQLite under `~/.launchpad`, or an in-memory store if that cannot be opened.
fn open_store() -> Arc<dyn KeyValueStore> {
    match SqliteStore::open() {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!("Storage unavailable, state will not persist: {e:#}");
            Arc::new(MemoryStore::new())
        }
    }
}

fn load_config() -> (LaunchpadConfig, Option<anyhow::Error>) {
    match LaunchpadConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (LaunchpadConfig::default(), Some(e)),
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_err) = load_config();
    let _log_guard = init_logging(&config)?;
    info!("Starting Launchpad v{VERSION}");
    if let Some(e) = config_err {
        warn!("Using default config: {e:#}");
    }

    let path = std::env::args().nth(1).unwrap_or_else(|| "/wallet".into());
    let Some(route) = Route::parse(&path) else {
        error!(path = %path, "unknown route");
        anyhow::bail!("Unknown route {path}");
    };

    let store = open_store();
    let catalog = Arc::new(Catalog::embedded().context("Failed to load bundled data")?);
    let mut session = WalletSession::new(store.clone(), catalog.clone());
    if !session.is_connected() {
        let connected = session.connect(None)?;
        info!(address = %connected.address, source = ?connected.source, "session started");
    }

    info!(route = %route, "rendering");
    let screen = render::render(&route, &config, &session, store)?;
    println!("{screen}");
    Ok(())
}

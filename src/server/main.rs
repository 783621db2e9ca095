//! Web server for the place names registers.
//!
//! Serves register listings and item pages as HTML, Turtle, JSON-LD and
//! RDF/XML from either a PostgreSQL table or a CSV export.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use placenames::config::Config;
use placenames::http::{build_router, AppState};
use placenames::store::{MemoryStore, PlaceStore, PostgresStore};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "placenames-server")]
#[command(about = "Linked-data server for Australian place names")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides the config file)
    #[arg(short, long)]
    listen: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "PLACE_NAMES_DB_CON")]
    database_url: Option<String>,

    /// CSV export of the PLACENAMES table, served from memory
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn open_store(config: &Config) -> Result<Arc<dyn PlaceStore>> {
    match (&config.data.database_url, &config.data.csv) {
        (Some(_), Some(_)) => {
            anyhow::bail!("Configure either a database URL or a CSV file, not both")
        }
        (Some(dsn), None) => {
            let store = PostgresStore::new(dsn).context("Invalid PostgreSQL connection string")?;
            Ok(Arc::new(store))
        }
        (None, Some(path)) => Ok(Arc::new(MemoryStore::from_csv_path(path)?)),
        (None, None) => anyhow::bail!(
            "No data store configured: pass --database-url, set PLACE_NAMES_DB_CON, or pass --csv"
        ),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Config::load_from_file(path)?
        }
        None => Config::default(),
    };
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }
    if let Some(url) = args.database_url {
        config.data.database_url = Some(url);
        config.data.csv = None;
    }
    if let Some(csv) = args.csv {
        config.data.csv = Some(csv);
        config.data.database_url = None;
    }

    info!("Place Names Server");
    let store = open_store(&config)?;
    if let Err(e) = store.ping().await {
        // Requests will answer 500 until the database is back
        warn!("Data store is not reachable at startup: {}", e);
    }

    let state = Arc::new(AppState::new(store, &config));
    let app = build_router(state);

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

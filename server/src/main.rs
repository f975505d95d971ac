//! billdesk-server: bill tracking HTTP service.
//!
//! Usage:
//!   billdesk-server --db bills.db --bind 127.0.0.1:3000
//!   billdesk-server --config billdesk.json
//!
//! Log level follows RUST_LOG (e.g. RUST_LOG=info).

use anyhow::Result;
use billdesk_core::{clock::BillClock, config::AppConfig, store::BillStore};
use billdesk_server::{router, AppState};
use clap::Parser;

#[derive(Parser)]
#[command(name = "billdesk-server", about = "Recurring bill tracker HTTP service")]
struct Cli {
    /// JSON config file. Flags below override its values.
    #[arg(long)]
    config: Option<String>,

    /// SQLite database path (":memory:" for a throwaway store).
    #[arg(long)]
    db: Option<String>,

    /// Listen address, e.g. 127.0.0.1:3000.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(db) = cli.db {
        config.database_path = db;
    }
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }

    let store = BillStore::open(&config.database_path)?;
    store.migrate()?;
    log::info!(
        "Bill store ready at {} ({} bills)",
        config.database_path,
        store.bill_count()?
    );

    let bind_addr = config.bind_addr.clone();
    let app = router(AppState::shared(store, BillClock::System, config));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}

//! `pokedex-server` binary: seed the store, serve the API, flush the final
//! snapshot on shutdown.

use std::sync::Arc;

use clap::Parser;
use pokedex_core::RecordStore;
use pokedex_server::persistence::{load_seed, snapshot_channel};
use pokedex_server::{logging, store_observers, Cli, MutationLog, NetworkModule};
use tokio::sync::watch;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_format)?;

    let network_config = cli.network_config();
    let persistence = cli.persistence_config();

    let (publisher, writer) = persistence
        .snapshot_file
        .clone()
        .map(snapshot_channel)
        .unzip();
    let observers = store_observers(Arc::new(MutationLog::default()), publisher);
    let store = RecordStore::new().with_observer(Arc::new(observers));

    let seeded = store.seed(load_seed(&persistence.seed_file).await);
    info!(records = seeded, "Store seeded");
    let store = Arc::new(store);

    let mut module = NetworkModule::new(network_config, Arc::clone(&store));
    let port = module.start().await?;
    info!(port, "Pokedex API listening");

    // Stopped only after the server drains, so late mutations still reach
    // the final flush.
    let (stop_writer, writer_stop_rx) = watch::channel(false);
    let writer_task = writer.map(|w| tokio::spawn(w.run(writer_stop_rx)));

    module.serve(shutdown_signal()).await?;

    let _ = stop_writer.send(true);
    if let Some(task) = writer_task {
        if let Err(err) = task.await {
            warn!(error = %err, "Snapshot writer task failed");
        }
    }
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Could not listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

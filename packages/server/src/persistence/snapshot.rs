//! Latest-wins snapshot persistence.
//!
//! [`SnapshotPublisher`] is a [`MutationObserver`]: the store calls it under
//! its write lock, so published collections arrive in mutation order. The
//! publisher only swaps the value in a `watch` channel; file I/O happens on
//! the [`SnapshotWriter`] task, which may coalesce bursts of mutations into
//! a single write. Failed writes are logged and never retried.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pokedex_core::{MutationKind, MutationObserver, Pokemon};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::PersistenceError;

type Latest = Option<Arc<Vec<Pokemon>>>;

/// Creates a connected publisher/writer pair targeting `path`.
#[must_use]
pub fn snapshot_channel(path: PathBuf) -> (SnapshotPublisher, SnapshotWriter) {
    let (tx, rx) = watch::channel(None);
    (SnapshotPublisher { tx }, SnapshotWriter { path, rx })
}

/// Store observer that hands every post-mutation collection to the writer.
#[derive(Debug)]
pub struct SnapshotPublisher {
    tx: watch::Sender<Latest>,
}

impl MutationObserver for SnapshotPublisher {
    fn on_mutation(&self, kind: MutationKind, records: &[Pokemon]) {
        debug!(kind = kind.as_str(), records = records.len(), "snapshot queued");
        self.tx.send_replace(Some(Arc::new(records.to_vec())));
    }
}

/// Background task writing the most recent published collection to disk.
#[derive(Debug)]
pub struct SnapshotWriter {
    path: PathBuf,
    rx: watch::Receiver<Latest>,
}

impl SnapshotWriter {
    /// Writes each new collection until `shutdown` flips to `true` or the
    /// publisher is dropped, then flushes anything still pending once.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                changed = self.rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.flush().await;
                }
                signalled = shutdown.changed() => {
                    if signalled.is_err() {
                        break;
                    }
                }
            }
        }

        if self.rx.has_changed().unwrap_or(false) {
            self.flush().await;
        }
        debug!(path = %self.path.display(), "snapshot writer stopped");
    }

    async fn flush(&mut self) {
        let latest = self.rx.borrow_and_update().clone();
        let Some(records) = latest else {
            return;
        };
        if let Err(err) = write_snapshot(&self.path, &records).await {
            warn!(error = %err, "Could not save snapshot");
        }
    }
}

/// Writes `records` as a pretty-printed JSON array, replacing the file.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub async fn write_snapshot(path: &Path, records: &[Pokemon]) -> Result<(), PersistenceError> {
    let json = serde_json::to_vec_pretty(records).map_err(|e| PersistenceError::json(path, e))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| PersistenceError::io(path, e))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use pokedex_core::{PokemonData, RecordStore};

    use super::*;
    use crate::persistence::read_records;

    fn draft(num: &str, name: &str) -> PokemonData {
        PokemonData {
            num: num.to_string(),
            name: name.to_string(),
            ..PokemonData::default()
        }
    }

    async fn wait_for_records(path: &Path, expected: usize) -> Vec<PokemonData> {
        for _ in 0..200 {
            if let Ok(records) = read_records(path).await {
                if records.len() == expected {
                    return records;
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("snapshot never reached {expected} records");
    }

    #[tokio::test]
    async fn mutations_reach_the_snapshot_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");
        let (publisher, writer) = snapshot_channel(path.clone());
        let (_stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(writer.run(stop_rx));

        let store = RecordStore::new().with_observer(Arc::new(publisher));
        store.insert(draft("001", "Bulbasaur")).unwrap();
        store.insert(draft("004", "Charmander")).unwrap();

        let written = wait_for_records(&path, 2).await;
        assert_eq!(written[1].name, "Charmander");

        store.delete(1).unwrap();
        let written = wait_for_records(&path, 1).await;
        assert_eq!(written[0].name, "Charmander");

        drop(store);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn shutdown_flushes_pending_state_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");
        let (publisher, writer) = snapshot_channel(path.clone());
        let (stop_tx, stop_rx) = watch::channel(false);

        // Publish before the writer runs so only the final flush can write it.
        let store = RecordStore::new().with_observer(Arc::new(publisher));
        store.insert(draft("007", "Squirtle")).unwrap();
        stop_tx.send(true).unwrap();

        writer.run(stop_rx).await;
        let written = read_records(&path).await.unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].name, "Squirtle");
    }

    #[tokio::test]
    async fn nothing_is_written_without_mutations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");
        let (_publisher, writer) = snapshot_channel(path.clone());
        let (stop_tx, stop_rx) = watch::channel(false);
        stop_tx.send(true).unwrap();

        writer.run(stop_rx).await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn write_failures_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("backup.json");
        let err = write_snapshot(&path, &[]).await.unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));
    }
}

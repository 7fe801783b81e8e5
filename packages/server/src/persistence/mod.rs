//! File-backed collaborators of the record store: seed loading at startup
//! and best-effort snapshots after every mutation.

pub mod seed;
pub mod snapshot;

pub use seed::{load_seed, read_records};
pub use snapshot::{snapshot_channel, write_snapshot, SnapshotPublisher, SnapshotWriter};

use std::path::{Path, PathBuf};

/// Errors from reading or writing record files.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistenceError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Where seed data comes from and where snapshots go.
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// JSON array read once at startup.
    pub seed_file: PathBuf,
    /// Pretty-printed JSON array rewritten after mutations. `None` disables
    /// snapshots.
    pub snapshot_file: Option<PathBuf>,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            seed_file: PathBuf::from("pokemon.json"),
            snapshot_file: Some(PathBuf::from("pokemon_backup.json")),
        }
    }
}

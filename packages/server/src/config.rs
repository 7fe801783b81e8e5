//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::network::{NetworkConfig, DEFAULT_PORT};
use crate::persistence::PersistenceConfig;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Fmt,
    /// One JSON object per event.
    Json,
}

/// Pokedex REST API server.
#[derive(Debug, Parser)]
#[command(name = "pokedex-server")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "POKEDEX_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on (0 picks a free port)
    #[arg(short, long, env = "POKEDEX_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// JSON array loaded at startup; sample data is used if it is unreadable
    #[arg(long, env = "POKEDEX_SEED_FILE", default_value = "pokemon.json")]
    pub seed_file: PathBuf,

    /// File rewritten after every mutation
    #[arg(long, env = "POKEDEX_SNAPSHOT_FILE", default_value = "pokemon_backup.json")]
    pub snapshot_file: PathBuf,

    /// Disable snapshot writes
    #[arg(long, env = "POKEDEX_NO_SNAPSHOT")]
    pub no_snapshot: bool,

    /// Allowed CORS origins, comma separated
    #[arg(long, env = "POKEDEX_CORS_ORIGINS", value_delimiter = ',', default_value = "*")]
    pub cors_origins: Vec<String>,

    /// Seconds before a request is answered with 408
    #[arg(long, env = "POKEDEX_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Log output format
    #[arg(long, env = "POKEDEX_LOG_FORMAT", value_enum, default_value_t = LogFormat::Fmt)]
    pub log_format: LogFormat,
}

impl Cli {
    #[must_use]
    pub fn network_config(&self) -> NetworkConfig {
        NetworkConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..NetworkConfig::default()
        }
    }

    #[must_use]
    pub fn persistence_config(&self) -> PersistenceConfig {
        PersistenceConfig {
            seed_file: self.seed_file.clone(),
            snapshot_file: (!self.no_snapshot).then(|| self.snapshot_file.clone()),
        }
    }
}

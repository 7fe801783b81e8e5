//! `Pokedex` Server: axum REST API over the in-memory record store, with
//! seed loading and snapshot persistence.

pub mod audit;
pub mod config;
pub mod logging;
pub mod network;
pub mod persistence;

pub use audit::{store_observers, MutationLog};
pub use config::{Cli, LogFormat};
pub use network::{NetworkConfig, NetworkModule};
pub use persistence::PersistenceConfig;

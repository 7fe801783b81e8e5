//! HTTP handlers for the Pokedex API.
//!
//! Defines `AppState` (the shared state carried through axum extractors)
//! and re-exports the handler functions used when building the router.

pub mod error;
pub mod health;
pub mod home;
pub mod pokemons;
pub mod queries;

pub use error::ApiError;
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use home::home_handler;

use std::sync::Arc;
use std::time::Instant;

use pokedex_core::RecordStore;

use super::{NetworkConfig, ShutdownController};

/// Shared application state passed to all axum handlers via `State` extraction.
///
/// Holds `Arc` references so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// The record store every API handler reads from or mutates.
    pub store: Arc<RecordStore>,
    /// Health state and in-flight tracking.
    pub shutdown: Arc<ShutdownController>,
    pub config: Arc<NetworkConfig>,
    /// Server start time, used for uptime.
    pub start_time: Instant,
}

impl AppState {
    #[must_use]
    pub fn new(
        store: Arc<RecordStore>,
        shutdown: Arc<ShutdownController>,
        config: NetworkConfig,
    ) -> Self {
        Self {
            store,
            shutdown,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }
}

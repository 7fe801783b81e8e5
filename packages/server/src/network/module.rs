//! Network module with deferred startup lifecycle.
//!
//! `new()` wires shared state, `start()` binds the TCP listener, and
//! `serve()` accepts requests until the shutdown future resolves. Splitting
//! bind from serve lets the entry point learn the bound port (and start the
//! snapshot writer) before traffic arrives.

use std::future::Future;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use pokedex_core::RecordStore;
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::config::NetworkConfig;
use super::handlers::{
    error, health_handler, home_handler, liveness_handler, pokemons, queries, readiness_handler,
    AppState,
};
use super::middleware::{build_http_layers, track_in_flight};
use super::shutdown::ShutdownController;

/// Owns the HTTP server lifecycle.
///
/// 1. `new()` -- allocates the shutdown controller around the given store
/// 2. `start()` -- binds the TCP listener
/// 3. `serve()` -- serves until shutdown, then drains in-flight requests
pub struct NetworkModule {
    config: NetworkConfig,
    listener: Option<TcpListener>,
    store: Arc<RecordStore>,
    shutdown: Arc<ShutdownController>,
}

impl NetworkModule {
    #[must_use]
    pub fn new(config: NetworkConfig, store: Arc<RecordStore>) -> Self {
        Self {
            config,
            listener: None,
            store,
            shutdown: Arc::new(ShutdownController::new()),
        }
    }

    /// Shared handle to the shutdown controller, so callers can inspect
    /// health state after `serve()` takes ownership of the module.
    #[must_use]
    pub fn shutdown_controller(&self) -> Arc<ShutdownController> {
        Arc::clone(&self.shutdown)
    }

    /// Assembles the router with all routes and middleware.
    pub fn build_router(&self) -> Router {
        let state = AppState::new(
            Arc::clone(&self.store),
            Arc::clone(&self.shutdown),
            self.config.clone(),
        );
        api_router(state)
    }

    /// Binds the TCP listener and returns the bound port (useful with port 0).
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound (e.g., port in use).
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let listener = TcpListener::bind(self.config.bind_address()).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves requests until `shutdown` resolves, then drains.
    ///
    /// After the signal the health state moves to Draining, the server waits
    /// up to `drain_timeout` for in-flight requests, and finally moves to
    /// Stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if `start()` was not called first or the server hits
    /// a fatal I/O error.
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let router = self.build_router();
        let Some(listener) = self.listener else {
            anyhow::bail!("start() must be called before serve()");
        };
        let shutdown_ctrl = self.shutdown;

        shutdown_ctrl.set_ready();
        info!("Serving HTTP API");

        let signal_ctrl = Arc::clone(&shutdown_ctrl);
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                signal_ctrl.trigger_shutdown();
            })
            .await?;

        // Covers the case where the server stopped without the signal firing.
        shutdown_ctrl.trigger_shutdown();
        if shutdown_ctrl.wait_for_drain(self.config.drain_timeout).await {
            info!("All in-flight requests drained");
        } else {
            warn!(
                in_flight = shutdown_ctrl.in_flight_count(),
                "Drain timeout expired with requests remaining"
            );
        }
        Ok(())
    }
}

/// Builds the API router over `state`.
///
/// Static segments (`bulk`, `spawn`, `size`) take priority over `{id}`.
/// Unknown paths and unsupported methods answer with the same JSON error
/// body as handler failures.
pub fn api_router(state: AppState) -> Router {
    let layers = build_http_layers(&state.config);

    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        .route("/api/stats", get(queries::stats))
        .route(
            "/api/pokemons",
            get(pokemons::list_pokemons)
                .post(pokemons::create_pokemon)
                .delete(pokemons::clear_pokemons),
        )
        .route("/api/pokemons/bulk", post(pokemons::bulk_create_pokemons))
        .route("/api/pokemons/spawn", get(queries::by_spawn_chance))
        .route("/api/pokemons/size", get(queries::by_size))
        .route("/api/pokemons/type/{type}", get(queries::by_type))
        .route("/api/pokemons/weakness/{type}", get(queries::by_weakness))
        .route("/api/pokemons/search/{query}", get(queries::search))
        .route("/api/pokemons/candy/{candy}", get(queries::by_candy))
        .route("/api/pokemons/egg/{egg}", get(queries::by_egg))
        .route(
            "/api/pokemons/type/",
            queries::parameter_required("Type parameter required"),
        )
        .route(
            "/api/pokemons/weakness/",
            queries::parameter_required("Weakness parameter required"),
        )
        .route(
            "/api/pokemons/search/",
            queries::parameter_required("Search query required"),
        )
        .route(
            "/api/pokemons/candy/",
            queries::parameter_required("Candy parameter required"),
        )
        .route(
            "/api/pokemons/egg/",
            queries::parameter_required("Egg parameter required"),
        )
        .route(
            "/api/pokemons/{id}",
            get(pokemons::get_pokemon)
                .put(pokemons::replace_pokemon)
                .patch(pokemons::patch_pokemon)
                .delete(pokemons::delete_pokemon),
        )
        .method_not_allowed_fallback(error::method_not_allowed)
        .fallback(error::route_not_found)
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            track_in_flight,
        ))
        .layer(layers)
        .with_state(state)
}

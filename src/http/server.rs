//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, body limit, CORS, request ID)
//! - Serve the front-end bundle at the root path
//! - Dispatch API requests to the config store
//! - Bind server to listener and shut down gracefully

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::handlers;
use crate::http::request_id::{UuidRequestId, X_REQUEST_ID};
use crate::store::ConfigStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ConfigStore>,
}

/// HTTP server for the config service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let store = match &config.store.home_dir {
            Some(root) => ConfigStore::with_root(root),
            None => ConfigStore::new(),
        };
        let state = AppState {
            store: Arc::new(store),
        };

        if config.assets.enabled && !Path::new(&config.assets.dir).is_dir() {
            tracing::warn!(
                dir = %config.assets.dir,
                "Assets directory not found; static requests will 404"
            );
        }

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        // The front end may be served from a different origin during
        // development, so the API answers any origin.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);

        let mut router = Router::new()
            .route("/api/apply_config", post(handlers::apply_config))
            .route("/api/save_config", post(handlers::save_config))
            .route("/api/load_config", get(handlers::load_config))
            .route("/api/status", get(handlers::get_status))
            .with_state(state)
            .layer(cors);

        if config.assets.enabled {
            let index = Path::new(&config.assets.dir).join("index.html");
            let assets = ServeDir::new(&config.assets.dir).fallback(ServeFile::new(index));
            router = router.fallback_service(assets);
        }

        router
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::new(
                header::HeaderName::from_static(X_REQUEST_ID),
                UuidRequestId,
            ))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

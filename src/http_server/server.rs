//! # HTTP Server
//!
//! Combines the book, documentation and health routers behind CORS and
//! request tracing, and serves them until Ctrl-C.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::store::{BookStore, StoreResult};

use super::book_routes::book_routes;
use super::config::HttpServerConfig;
use super::docs_routes::docs_routes;
use super::observability_routes::health_routes;

/// HTTP server for the book API
pub struct HttpServer {
    config: HttpServerConfig,
    store: Arc<BookStore>,
    router: Router,
}

impl HttpServer {
    /// Open the configured backing file and build the server around it
    pub fn open(config: HttpServerConfig) -> StoreResult<Self> {
        let store = Arc::new(BookStore::open_file(&config.db_path)?);
        Ok(Self::with_store(config, store))
    }

    /// Build the server around an already-open store
    pub fn with_store(config: HttpServerConfig, store: Arc<BookStore>) -> Self {
        let router = Self::build_router(&config, store.clone());
        Self {
            config,
            store,
            router,
        }
    }

    /// Build the combined router with all endpoints
    pub fn build_router(config: &HttpServerConfig, store: Arc<BookStore>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| match s.parse() {
                    Ok(origin) => Some(origin),
                    Err(_) => {
                        warn!(origin = %s, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes(store.clone()))
            .merge(book_routes(store))
            .merge(docs_routes(&config.public_url()))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Shared handle to the store
    pub fn store(&self) -> Arc<BookStore> {
        self.store.clone()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(addr = %addr, "Book API listening");
        info!("API docs: {}/api-docs", self.config.public_url());

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
    }
}

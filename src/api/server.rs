//! HTTP Server implementation
//!
//! This module provides the HTTP server using Axum framework with:
//! - Configurable host/port binding
//! - Graceful shutdown handling
//! - Request timeouts
//! - CORS support

use crate::api::handlers::AppState;
use crate::api::middleware::trace_id_middleware;
use crate::api::routes::build_api_routes;
use crate::auth::ApiKeyGate;
use crate::core::config::{Config, ServerConfig};
use crate::core::services::AirportService;
use crate::db::manager::DatabaseManager;
use crate::db::repository::AirportRepository;
use axum::{
    http::{HeaderName, HeaderValue},
    middleware, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

/// HTTP API Server
pub struct ApiServer {
    router: Router,
    config: ServerConfig,
}

impl ApiServer {
    /// Create a new API server with the given configuration and database manager
    pub fn new(config: &Config, db: Arc<DatabaseManager>) -> anyhow::Result<Self> {
        let router = Self::build_router(config, db)?;

        Ok(Self {
            router,
            config: config.server.clone(),
        })
    }

    /// Build the Axum router with all routes and middleware
    pub fn build_router(config: &Config, db: Arc<DatabaseManager>) -> anyhow::Result<Router> {
        let airport_repo = Arc::new(AirportRepository::new(db.clone()));
        let airport_service = Arc::new(AirportService::new(airport_repo));
        let gate = Arc::new(ApiKeyGate::new(db, &config.security)?);

        let app_state = AppState {
            airport_service,
            gate,
        };

        Ok(Self::apply_layers(build_api_routes(app_state), config))
    }

    /// Wrap routes in the shared middleware stack
    fn apply_layers(router: Router, config: &Config) -> Router {
        // Outermost first: CORS answers preflights before the key check runs.
        router
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(middleware::from_fn(trace_id_middleware))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.server.request_timeout,
                    ))),
            )
            .layer(Self::build_cors_layer(&config.security.allowed_origins))
    }

    /// Build CORS layer from allowed origins configuration
    ///
    /// Credentials are allowed, so a `*` entry mirrors the caller's origin
    /// instead of answering with a literal wildcard.
    fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
        let cors = CorsLayer::new()
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
            .expose_headers([HeaderName::from_static("x-trace-id")]);

        if allowed_origins.iter().any(|origin| origin == "*") {
            cors.allow_origin(AllowOrigin::mirror_request())
        } else {
            let origins: Vec<HeaderValue> = allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            cors.allow_origin(origins)
        }
    }

    /// Start the HTTP server and listen for requests
    ///
    /// This method will block until the server is shut down gracefully.
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let socket_addr: SocketAddr = addr.parse()?;

        info!(
            host = %self.config.host,
            port = self.config.port,
            request_timeout = self.config.request_timeout,
            "Starting HTTP server"
        );

        let listener = tokio::net::TcpListener::bind(socket_addr).await?;

        info!(addr = %socket_addr, "HTTP server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP server shut down gracefully");

        Ok(())
    }

    /// Get a reference to the router
    pub fn router(&self) -> &Router {
        &self.router
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Initiating graceful shutdown...");
}

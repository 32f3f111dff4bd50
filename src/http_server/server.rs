//! # HTTP Server
//!
//! Main HTTP server combining the deposit and health routers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::manifest::ManifestParser;
use crate::observability::Event;

use super::config::HttpServerConfig;
use super::deposit_routes::{deposit_routes, DepositState};
use super::errors::{ServerError, ServerResult};
use super::health_routes::health_routes;

/// HTTP Server for deposit validation
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig) -> Self {
        let state = Arc::new(DepositState::new(&config));
        Self::with_state(config, state)
    }

    /// Create a server that parses manifests with `parser`
    pub fn with_parser(config: HttpServerConfig, parser: Arc<dyn ManifestParser>) -> Self {
        let state = Arc::new(DepositState::with_parser(&config, parser));
        Self::with_state(config, state)
    }

    fn with_state(config: HttpServerConfig, state: Arc<DepositState>) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, state: Arc<DepositState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(deposit_routes(state))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> ServerResult<()> {
        let addr: SocketAddr = self
            .socket_addr()
            .parse()
            .map_err(|_| ServerError::InvalidAddress(self.socket_addr()))?;

        let listener = TcpListener::bind(addr).await?;
        info!(
            event = %Event::ServerStart,
            addr = %addr,
            max_upload_bytes = self.config.max_upload_bytes
        );

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new();
        assert_eq!(server.socket_addr(), "0.0.0.0:4567");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig::with_port(8080);
        let server = HttpServer::with_config(config);
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_with_origins() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:3000".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::with_config(config).router();
    }

    #[tokio::test]
    async fn test_invalid_host_rejected() {
        let config = HttpServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        let err = HttpServer::with_config(config).start().await.unwrap_err();
        assert!(matches!(err, ServerError::InvalidAddress(_)));
    }
}

//! DashboardBuilder for fluent API to build the HTTP server

use super::host::DashboardHost;
use super::router::{build_invoice_routes, health_routes};
use crate::config::DashboardConfig;
use crate::core::clock::{Clock, SystemClock};
use crate::core::error::{ConfigError, DashboardResult};
use crate::core::service::InvoiceStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builder for the dashboard HTTP server
///
/// # Example
///
/// ```ignore
/// let app = DashboardBuilder::new()
///     .with_config(config)
///     .with_store(InMemoryInvoiceStore::new())
///     .build()?;
/// ```
pub struct DashboardBuilder {
    store: Option<Arc<dyn InvoiceStore>>,
    config: DashboardConfig,
    clock: Arc<dyn Clock>,
    custom_routes: Vec<Router>,
}

impl DashboardBuilder {
    /// Create a new DashboardBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            config: DashboardConfig::default(),
            clock: Arc::new(SystemClock),
            custom_routes: Vec::new(),
        }
    }

    /// Set the invoice store (required)
    pub fn with_store(mut self, store: impl InvoiceStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared invoice store
    pub fn with_shared_store(mut self, store: Arc<dyn InvoiceStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the clock that dates new invoices
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(mut self) -> DashboardResult<DashboardHost> {
        self.config.validate()?;

        let store = self.store.take().ok_or(ConfigError::MissingStore)?;

        Ok(DashboardHost::new(self.config, store, self.clock))
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = self.build_host()?;

        let mut app = health_routes().merge(build_invoice_routes(host.app_state()));
        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        if host.config.server.cors_permissive {
            app = app.layer(permissive_cors());
        }

        Ok(app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.bind` from the configuration.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// CORS layer allowing any origin, method and header
fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

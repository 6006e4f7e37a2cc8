//! Axum server setup
//!
//! The store is opened by the caller before anything here runs, so no
//! request is accepted until `student_record` exists. After the listener
//! drains, the store is closed.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::RecordStore;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8000)
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }
}

/// Open API: any origin, any method, any header, no credentials.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::records::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
///
/// # Example
///
/// ```ignore
/// let store = open_store(&StoreConfig::sqlite(None)).await?;
/// run_server(store, ServerConfig::default()).await?;
/// ```
pub async fn run_server(
    store: Arc<dyn RecordStore>,
    config: ServerConfig,
) -> Result<(), ServerError> {
    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            store.close().await;
            return Err(ServerError::Bind {
                addr: config.bind_addr,
                source: e,
            });
        }
    };

    run_server_with_shutdown(store, listener, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves, then close
/// the store.
pub async fn run_server_with_shutdown<F>(
    store: Arc<dyn RecordStore>,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(AppState::new(Arc::clone(&store)));

    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Server listening on http://{}", addr);
    }

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    store.close().await;
    tracing::info!("Server shutdown complete");

    served.map_err(ServerError::Io)
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

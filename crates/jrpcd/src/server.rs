//! Listener lifecycle and the production entry point.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use jrpc_dispatch::Dispatcher;

use crate::bootstrap::{BootstrapError, Daemon, SystemConfigLoader, bootstrap_with};
use crate::context::AppContext;
use crate::health::StructuredHealthReporter;
use crate::http::build_router;
use crate::workers::MethodTable;

const SERVER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::server");

/// Errors surfaced while serving requests.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that could not be bound.
        addr: SocketAddr,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The bound listener has no readable local address.
    #[error("failed to read listener address: {0}")]
    LocalAddr(#[source] io::Error),
    /// The server loop stopped on an IO error.
    #[error("server stopped on IO error: {0}")]
    Serve(#[source] io::Error),
}

/// Errors surfaced by [`run_daemon`].
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Bootstrap failed.
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
    /// Serving failed.
    #[error(transparent)]
    Serve(#[from] ServeError),
}

/// Binds a TCP listener on `addr`.
///
/// # Errors
///
/// Returns [`ServeError::Bind`] if the address cannot be bound.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServeError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })
}

impl Daemon {
    /// Serves JSON-RPC requests on `listener` until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError`] when the server loop fails.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let reporter = self.reporter();
        let result = self.serve_inner(listener, shutdown).await;
        match &result {
            Ok(()) => reporter.server_stopped(),
            Err(error) => reporter.server_failed(error),
        }
        result
    }

    async fn serve_inner<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let config = self.config();
        let dispatcher = Dispatcher::new(
            Arc::new(MethodTable::builtin()),
            Arc::new(AppContext::from_config(config)),
            config.request_timeout(),
        );
        let app = build_router(Arc::new(dispatcher), config.max_body_bytes());

        let address = listener.local_addr().map_err(ServeError::LocalAddr)?;
        self.reporter().server_listening(address);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServeError::Serve)
    }
}

/// Runs the daemon with production collaborators until Ctrl-C.
///
/// # Errors
///
/// Returns [`LaunchError`] if bootstrap, binding or serving fails.
pub async fn run_daemon() -> Result<(), LaunchError> {
    let reporter = Arc::new(StructuredHealthReporter::new());
    let daemon = bootstrap_with(&SystemConfigLoader, reporter)?;
    let listener = match bind(daemon.config().listen_address()).await {
        Ok(listener) => listener,
        Err(error) => {
            daemon.reporter().server_failed(&error);
            return Err(error.into());
        }
    };
    daemon.serve(listener, shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(target: SERVER_TARGET, %error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!(target: SERVER_TARGET, "shutdown signal received");
}

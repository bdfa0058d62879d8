//! # Appwire Server
//!
//! A demo web application assembled by [`ServerFactory`] and served with `axum`.
//!
//! ## Example
//! ```no_run
//! use appwire_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder().build()?.run().await
//! }
//! ```

mod config;
mod deps;
mod router;
mod routes;

pub use crate::config::ServerConfig;
pub use crate::deps::{Greeter, ServerDeps, Visit};

use anyhow::{Context, Result};
use appwire::prelude::*;
use appwire::web::WebApp;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

/// Builds the demo web application.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerFactory;

impl AppFactory for ServerFactory {
    type App = WebApp;
    type Config = ServerConfig;
    type Builder = ServerDeps;

    fn loaders(loaders: &mut Loaders<Self>) {
        loaders.add("load_system", routes::load_system).add("load_greetings", routes::load_greetings);
    }
}

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    config: Option<Arc<ServerConfig>>,
}

impl ServerBuilder {
    /// Uses `config` instead of reading the environment.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = Some(Arc::new(config));
        self
    }

    /// Builds the application and wires its dependencies.
    ///
    /// # Errors
    /// Returns an error if the configuration is missing or malformed, or if a loader
    /// or binder fails.
    pub fn build(self) -> Result<Server> {
        let injector = Injector::new();
        let app = ServerFactory
            .create(env!("CARGO_PKG_NAME"), self.config, Some(&injector))
            .context("Failed to build the web application")?;

        let config = injector.resolve::<ServerConfig>()?;
        let address = SocketAddr::new(config.address, config.port);
        info!(address = %address, "Initializing server");

        Ok(Server { address, router: router::init(app, injector) })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    address: SocketAddr,
    router: Router,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    #[must_use]
    pub const fn address(&self) -> SocketAddr {
        self.address
    }

    /// The finished router, with the request-scope and trace layers installed.
    #[must_use]
    pub const fn router(&self) -> &Router {
        &self.router
    }

    /// Serves until Ctrl+C or SIGTERM, then drains in-flight requests.
    ///
    /// # Errors
    /// Returns an error if the address cannot be bound or the server fails.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.address)
            .await
            .with_context(|| format!("Failed to bind {}", self.address))?;
        info!("Starting HTTP server on http://{}", self.address);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async {
                if let Err(e) = shutdown_signal().await {
                    error!("Error while waiting for shutdown signal: {e}");
                    return;
                }
                info!("Shutdown signal received, starting graceful shutdown...");
            })
            .await
            .context("HTTP server failed")?;

        info!("Server shutdown complete");
        Ok(())
    }
}

/// Waits for Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res?,
        res = terminate => res?,
    }

    Ok(())
}

//! Server construction, startup, and graceful shutdown.
//!
//! # Responsibilities
//! - Validate configuration and compile routes eagerly
//! - Bind the listener, plain or TLS, and serve until shutdown
//! - Drain in-flight requests within a bounded deadline on shutdown
//!
//! # Design Decisions
//! - Lifecycle state is a single atomic; each transition happens once
//! - Read/write timeouts bound each request independently via the timeout
//!   layer, not the server lifetime

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::{Duration, Instant};

use axum::Router;
use axum_server::Handle;
use tokio::sync::watch;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::http::middleware;
use crate::net::tls;
use crate::routing::{CompiledRouter, RouteDescriptor};

/// Lifecycle states. Transitions are one-way:
/// Created → Listening → ShuttingDown → Stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum State {
    Created = 0,
    Listening = 1,
    ShuttingDown = 2,
    Stopped = 3,
}

/// HTTP(S) server owning the wrapped handler chain and the listener handle.
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
    handle: Handle,
    state: AtomicU8,
    stopped: watch::Sender<bool>,
}

impl HttpServer {
    /// Validate `config`, compile `routes`, and assemble the middleware
    /// chain. No socket is touched until [`start`](Self::start).
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] for invalid config values or route
    /// descriptors; [`Error::TlsConfig`] for a partial cert/key pair.
    pub fn new(routes: Vec<RouteDescriptor>, config: ServerConfig) -> Result<Self> {
        config.validate()?;

        let base = CompiledRouter::compile(routes)?.into_router();
        let request_deadline = config.read_timeout + config.write_timeout;
        let base = if request_deadline > Duration::ZERO {
            base.layer(TimeoutLayer::new(request_deadline))
        } else {
            base
        };
        let base = base.layer(TraceLayer::new_for_http());
        let router = middleware::wrap(base, &config);

        let (stopped, _) = watch::channel(false);
        Ok(Self {
            config,
            router,
            handle: Handle::new(),
            state: AtomicU8::new(State::Created as u8),
            stopped,
        })
    }

    /// Bind the listen address and serve until shutdown completes.
    ///
    /// Occupies the calling task for the server's whole lifetime; shutdown
    /// must come from another task. TLS is used iff both certificate and
    /// key files are configured.
    ///
    /// # Errors
    ///
    /// [`Error::Lifecycle`] if the server was already started;
    /// [`Error::Bind`] if the address cannot be bound;
    /// [`Error::TlsConfig`] if the TLS material cannot be loaded.
    pub async fn start(&self) -> Result<()> {
        if self
            .transition(State::Created, State::Listening)
            .is_err()
        {
            return Err(Error::Lifecycle("server already started".into()));
        }

        let addr: SocketAddr = match self.config.listen.parse() {
            Ok(addr) => addr,
            Err(e) => {
                self.finish();
                return Err(Error::Configuration(format!(
                    "listen address {:?}: {e}",
                    self.config.listen
                )));
            }
        };

        tracing::info!(
            listen = %self.config.listen,
            path_prefix = %self.config.path_prefix,
            cors = self.config.cors,
            auth = self.config.auth_enabled,
            debug = self.config.debug,
            tls = self.config.tls_active(),
            "starting server"
        );

        let app = self.router.clone().into_make_service();
        let served = match (&self.config.cert_file, &self.config.key_file) {
            (Some(cert_file), Some(key_file)) => {
                let settings = self.config.tls.clone().unwrap_or_default();
                let rustls_config = match tls::load(cert_file, key_file, &settings).await {
                    Ok(config) => config,
                    Err(e) => {
                        self.finish();
                        return Err(e);
                    }
                };
                axum_server::bind_rustls(addr, rustls_config)
                    .handle(self.handle.clone())
                    .serve(app)
                    .await
            }
            (None, None) => {
                axum_server::bind(addr)
                    .handle(self.handle.clone())
                    .serve(app)
                    .await
            }
            // ServerConfig::validate rejects partial cert/key pairs.
            _ => {
                self.finish();
                return Err(Error::TlsConfig(
                    "exactly one of cert_file / key_file is set".into(),
                ));
            }
        };

        self.finish();
        match served {
            Ok(()) => {
                tracing::info!("server stopped");
                Ok(())
            }
            Err(source) => Err(Error::Bind {
                addr: self.config.listen.clone(),
                source,
            }),
        }
    }

    /// Gracefully stop the server: stop accepting new connections, drain
    /// in-flight requests up to `deadline`, then force-close the rest.
    ///
    /// Calling this on a server that is not listening is a no-op returning
    /// success, so repeated calls are safe. Exceeding the deadline is
    /// reported as a warning, never an error.
    pub async fn shutdown(&self, deadline: Duration) -> Result<()> {
        if self
            .transition(State::Listening, State::ShuttingDown)
            .is_err()
        {
            return Ok(());
        }

        tracing::info!(deadline = ?deadline, "shutting down");
        let begun = Instant::now();
        self.handle.graceful_shutdown(Some(deadline));

        let mut stopped = self.stopped.subscribe();
        let _ = stopped.wait_for(|done| *done).await;

        if begun.elapsed() >= deadline {
            tracing::warn!(
                elapsed = ?begun.elapsed(),
                "drain deadline exceeded, remaining connections were closed"
            );
        }
        Ok(())
    }

    /// Resolves once the listener is bound, with the bound address.
    ///
    /// Useful with an ephemeral port (`"127.0.0.1:0"`). Returns `None` if
    /// the server stopped before binding completed.
    pub async fn listening(&self) -> Option<SocketAddr> {
        self.handle.listening().await
    }

    /// The configuration this server was built with.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    fn transition(&self, from: State, to: State) -> std::result::Result<u8, u8> {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
    }

    fn finish(&self) {
        self.state.store(State::Stopped as u8, Ordering::SeqCst);
        let _ = self.stopped.send(true);
    }
}

/// Build a server from `routes` and `config` and run it until shutdown.
///
/// Convenience for embedders that construct and immediately start; the
/// returned future blocks like [`HttpServer::start`].
pub async fn serve(routes: Vec<RouteDescriptor>, config: ServerConfig) -> Result<()> {
    let server = HttpServer::new(routes, config)?;
    server.start().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health_route() -> Vec<RouteDescriptor> {
        vec![RouteDescriptor::path("/health", "GET", || async { "ok" })]
    }

    #[test]
    fn partial_tls_config_fails_construction() {
        let config = ServerConfig {
            cert_file: Some("server.crt".into()),
            ..ServerConfig::default()
        };
        let result = HttpServer::new(health_route(), config);
        assert!(matches!(result, Err(Error::TlsConfig(_))));
    }

    #[test]
    fn conflicting_routes_fail_construction() {
        let routes = vec![
            RouteDescriptor::path("/health", "GET", || async { "a" }),
            RouteDescriptor::path("/health", "GET", || async { "b" }),
        ];
        let result = HttpServer::new(routes, ServerConfig::default());
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[tokio::test]
    async fn shutdown_before_start_is_a_noop() {
        let server = HttpServer::new(health_route(), ServerConfig::default()).unwrap();
        assert!(server.shutdown(Duration::from_secs(1)).await.is_ok());
        assert!(server.shutdown(Duration::from_secs(1)).await.is_ok());
    }
}

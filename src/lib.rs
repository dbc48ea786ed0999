//! Declarative bootstrap layer for an HTTP(S) server.
//!
//! Route descriptors plus a [`ServerConfig`] become a running server:
//!
//! ```no_run
//! use rest_server::{HttpServer, RouteDescriptor, ServerConfig};
//!
//! # async fn run() -> rest_server::Result<()> {
//! let routes = vec![RouteDescriptor::path("/health", "GET", || async { "ok" })];
//! let server = HttpServer::new(routes, ServerConfig::default())?;
//! server.start().await
//! # }
//! ```
//!
//! Cross-cutting middleware (debug logging, authentication, path-prefix
//! stripping, CORS) wraps the compiled router in a fixed order driven by
//! configuration flags. The listener runs plain or TLS depending on the
//! configured certificate material, and [`HttpServer::shutdown`] drains
//! in-flight requests within a bounded deadline.

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod routing;

// Cross-cutting concerns
pub mod error;
pub mod lifecycle;

pub use config::{ServerConfig, TlsSettings};
pub use error::{Error, Result};
pub use http::middleware::TokenMiddleware;
pub use lifecycle::{serve, HttpServer, Shutdown};
pub use routing::{CompiledRouter, RouteDescriptor};

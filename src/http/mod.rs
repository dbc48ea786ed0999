//! HTTP request-cycle plumbing.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → debug layer (log request, never rejects)
//!     → auth layer (embedder's token middleware, may short-circuit 401)
//!     → prefix stripping (rewrite path, 404 outside the prefix)
//!     → CORS (preflight short-circuit, response headers)
//!     → compiled router dispatch
//! ```

pub mod middleware;
pub mod response;

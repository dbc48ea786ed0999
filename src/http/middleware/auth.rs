//! Authentication layer plumbing.
//!
//! Token verification itself is the embedder's concern: the configuration
//! carries an opaque capability that wraps a handler with whatever checks
//! the deployment needs (JWT verification, API keys, mTLS identity). The
//! capability is invoked exactly once while the chain is assembled, and its
//! rejections must short-circuit with an authentication failure response.

use std::sync::Arc;

use axum::Router;

/// Handler-wrapping authentication capability supplied by the embedder.
///
/// Wraps outside prefix stripping and routing: a rejected request never
/// reaches either, and the capability always observes the original request
/// path.
pub type TokenMiddleware = Arc<dyn Fn(Router) -> Router + Send + Sync>;

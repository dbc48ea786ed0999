//! Middleware chain assembly.
//!
//! # Responsibilities
//! - Wrap the compiled router with the optional cross-cutting layers
//! - Guarantee a fixed layer order regardless of flag combinations
//!
//! # Design Decisions
//! - Order, outermost first: debug logging → authentication → prefix
//!   stripping → CORS → router
//! - Authentication wraps outside prefix stripping, so it always sees the
//!   path exactly as the transport delivered it
//! - CORS sits adjacent to the router, so a preflight short-circuit skips
//!   exactly as much of the chain as a routed request pays
//! - Layers are handler-wrapping transformations; flags toggle presence,
//!   never position

pub mod auth;
pub mod cors;
pub mod debug;
pub mod prefix;

use axum::Router;

use crate::config::ServerConfig;

pub use auth::TokenMiddleware;

/// Wrap `base` with the configured middleware layers.
///
/// Layers are applied innermost-first, so the code below reads
/// inner → outer: CORS, prefix stripping, authentication, debug logging.
pub fn wrap(base: Router, config: &ServerConfig) -> Router {
    let mut handler = base;

    if config.cors {
        handler = handler.layer(cors::permissive());
    }
    if !config.path_prefix.is_empty() {
        handler = prefix::strip(handler, config.path_prefix.clone());
    }
    if config.auth_enabled {
        // auth_enabled implies token_middleware; ServerConfig::validate
        // enforces it before a server is built.
        if let Some(token_middleware) = &config.token_middleware {
            handler = token_middleware(handler);
        }
    }
    if config.debug {
        handler = debug::log_requests(handler);
    }

    handler
}

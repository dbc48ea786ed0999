//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! RouteDescriptor[] (caller-supplied, ordered)
//!     → router.rs (compile: parse methods, reject conflicts)
//!     → CompiledRouter (exact map + longest-prefix list, immutable)
//!
//! Incoming request
//!     → CompiledRouter::dispatch (exact match, then longest prefix)
//!     → matched handler, 405 on method mismatch, 404 on no match
//! ```
//!
//! # Design Decisions
//! - Routes compiled once at startup, immutable at runtime
//! - No regex; exact lookup plus a plain `starts_with` prefix scan
//! - Conflicting (pattern, method) registrations fail compilation, not
//!   request handling
//! - A path match with the wrong method is answered 405, never passed on
//!   to another route

pub mod router;
pub mod table;

pub use router::CompiledRouter;
pub use table::RouteDescriptor;
pub use table::RouteHandler;

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! embedding application
//!     → schema.rs (ServerConfig built in code, owned by the caller)
//!     → validation.rs (semantic checks at server construction)
//!     → ServerConfig (validated, immutable, passed by value)
//! ```
//!
//! # Design Decisions
//! - Flag/env/file loading lives outside this crate; the embedder builds
//!   the struct and hands it over
//! - Config is immutable once the server is constructed
//! - All fields have defaults so minimal configs stay small
//! - Validation separates syntactic (serde) from semantic checks

pub mod schema;
pub mod validation;

pub use schema::Curve;
pub use schema::ServerConfig;
pub use schema::TlsSettings;
pub use schema::TlsVersion;

//! Route descriptors.
//!
//! A descriptor binds an exact path or a path prefix, plus a
//! comma-separated verb list, to an opaque handler. Exactly one of
//! `path` / `path_prefix` may be set; both constraints are checked when the
//! table is compiled.

use std::convert::Infallible;
use std::fmt;

use axum::extract::Request;
use axum::handler::{Handler, HandlerWithoutStateExt};
use axum::http::Method;
use axum::response::Response;
use tower::util::BoxCloneSyncService;

use crate::error::{Error, Result};

/// Opaque request-handling capability bound to a route.
pub type RouteHandler = BoxCloneSyncService<Request, Response, Infallible>;

/// Declarative binding of an HTTP path (or prefix) and method set to a
/// handler.
#[derive(Clone)]
pub struct RouteDescriptor {
    /// Exact URL path to match (mutually exclusive with `path_prefix`).
    pub path: String,

    /// Path prefix to match (mutually exclusive with `path`).
    pub path_prefix: String,

    /// Comma-separated HTTP verb list, e.g. `"GET,POST"`.
    pub methods: String,

    /// Handler invoked for matching requests.
    pub handler: RouteHandler,
}

impl RouteDescriptor {
    /// Bind `handler` to requests matching `path` exactly.
    pub fn path<H, T>(path: impl Into<String>, methods: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()> + Sync,
        T: 'static,
    {
        Self {
            path: path.into(),
            path_prefix: String::new(),
            methods: methods.into(),
            handler: boxed(handler),
        }
    }

    /// Bind `handler` to every request whose path starts with `prefix`.
    pub fn prefix<H, T>(prefix: impl Into<String>, methods: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()> + Sync,
        T: 'static,
    {
        Self {
            path: String::new(),
            path_prefix: prefix.into(),
            methods: methods.into(),
            handler: boxed(handler),
        }
    }
}

impl fmt::Debug for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDescriptor")
            .field("path", &self.path)
            .field("path_prefix", &self.path_prefix)
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}

fn boxed<H, T>(handler: H) -> RouteHandler
where
    H: Handler<T, ()> + Sync,
    T: 'static,
{
    BoxCloneSyncService::new(handler.into_service())
}

/// Parse a comma-separated verb list into a deduplicated method set.
pub(crate) fn parse_methods(raw: &str) -> Result<Vec<Method>> {
    let mut methods = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let method = Method::from_bytes(token.to_ascii_uppercase().as_bytes())
            .map_err(|_| Error::Configuration(format!("invalid HTTP method {token:?}")))?;
        if !methods.contains(&method) {
            methods.push(method);
        }
    }
    if methods.is_empty() {
        return Err(Error::Configuration(format!(
            "route has an empty method list {raw:?}"
        )));
    }
    Ok(methods)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_verbs() {
        let methods = parse_methods("GET,POST").unwrap();
        assert_eq!(methods, vec![Method::GET, Method::POST]);
    }

    #[test]
    fn parsing_is_case_insensitive_and_trims() {
        let methods = parse_methods(" get , Put ").unwrap();
        assert_eq!(methods, vec![Method::GET, Method::PUT]);
    }

    #[test]
    fn duplicate_verbs_collapse() {
        let methods = parse_methods("GET,GET,POST").unwrap();
        assert_eq!(methods, vec![Method::GET, Method::POST]);
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(matches!(
            parse_methods(""),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            parse_methods(" , "),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn malformed_verb_is_rejected() {
        assert!(matches!(
            parse_methods("GE T"),
            Err(Error::Configuration(_))
        ));
    }
}

//! Compiled route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes, immutable after construction
//! - Look up the matching route for a request path and method
//! - Answer 405 for a path match without a method match, 404 otherwise
//!
//! # Design Decisions
//! - Exact-path matches always win over prefix matches
//! - Among prefix matches the longest prefix wins
//! - Descriptors may share a pattern with disjoint method sets; duplicate
//!   (pattern, method) pairs are rejected at compile time

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::extract::Request;
use axum::http::Method;
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use crate::error::{Error, Result};
use crate::http::response::{method_not_allowed, not_found};
use crate::routing::table::{parse_methods, RouteDescriptor, RouteHandler};

/// A single compiled route: parsed method set plus handler.
struct CompiledRoute {
    methods: Vec<Method>,
    handler: RouteHandler,
}

/// Immutable dispatch table built once from route descriptors.
pub struct CompiledRouter {
    /// Exact-path routes, keyed by path.
    exact: HashMap<String, Vec<CompiledRoute>>,

    /// Prefix routes grouped by prefix, longest prefix first.
    prefixes: Vec<(String, Vec<CompiledRoute>)>,
}

impl CompiledRouter {
    /// Compile an ordered list of route descriptors.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if a descriptor sets neither or both of
    /// `path` / `path_prefix`, has an empty or malformed method list, or
    /// repeats an already-registered (pattern, method) pair.
    pub fn compile(descriptors: Vec<RouteDescriptor>) -> Result<Self> {
        let mut exact: HashMap<String, Vec<CompiledRoute>> = HashMap::new();
        let mut prefixes: Vec<(String, Vec<CompiledRoute>)> = Vec::new();
        let mut seen: HashSet<(bool, String, Method)> = HashSet::new();

        for descriptor in descriptors {
            let RouteDescriptor {
                path,
                path_prefix,
                methods,
                handler,
            } = descriptor;

            let (is_prefix, pattern) = match (path.is_empty(), path_prefix.is_empty()) {
                (false, true) => (false, path),
                (true, false) => (true, path_prefix),
                (true, true) => {
                    return Err(Error::Configuration(
                        "route must set one of path or path_prefix".into(),
                    ))
                }
                (false, false) => {
                    return Err(Error::Configuration(format!(
                        "route {path:?} sets both path and path_prefix"
                    )))
                }
            };

            let methods = parse_methods(&methods)?;
            for method in &methods {
                if !seen.insert((is_prefix, pattern.clone(), method.clone())) {
                    return Err(Error::Configuration(format!(
                        "duplicate route registration for {method} {pattern}"
                    )));
                }
            }

            tracing::debug!(
                pattern = %pattern,
                prefix = is_prefix,
                methods = ?methods,
                "adding route"
            );

            let route = CompiledRoute { methods, handler };
            if is_prefix {
                match prefixes.iter().position(|(p, _)| *p == pattern) {
                    Some(i) => prefixes[i].1.push(route),
                    None => prefixes.push((pattern, vec![route])),
                }
            } else {
                exact.entry(pattern).or_default().push(route);
            }
        }

        // Longest prefix first, so the first starts_with hit wins.
        prefixes.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Ok(Self { exact, prefixes })
    }

    /// Dispatch a request to the matching route.
    pub async fn dispatch(&self, req: Request) -> Response {
        let path = req.uri().path().to_string();

        let routes = match self.exact.get(&path) {
            Some(routes) => routes,
            None => {
                match self
                    .prefixes
                    .iter()
                    .find(|(prefix, _)| path.starts_with(prefix.as_str()))
                {
                    Some((_, routes)) => routes,
                    None => return not_found(),
                }
            }
        };

        match routes.iter().find(|r| r.methods.contains(req.method())) {
            Some(route) => {
                let handler = route.handler.clone();
                match handler.oneshot(req).await {
                    Ok(response) => response,
                    Err(never) => match never {},
                }
            }
            None => method_not_allowed(routes.iter().flat_map(|r| r.methods.iter())),
        }
    }

    /// Expose the table as an axum [`Router`] whose fallback performs
    /// dispatch.
    pub fn into_router(self) -> Router {
        let table = Arc::new(self);
        Router::new().fallback(move |req: Request| {
            let table = Arc::clone(&table);
            async move { table.dispatch(req).await }
        })
    }
}

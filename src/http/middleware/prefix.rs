//! Path-prefix stripping.
//!
//! Removes a fixed leading segment before route matching, for servers
//! mounted behind an external path-based router. Matching is a raw string
//! prefix: the remainder (query string included) is forwarded, a fully
//! stripped path becomes `/`, and requests outside the prefix are answered
//! 404 rather than treated as errors.

use axum::extract::Request;
use axum::http::uri::{Parts, PathAndQuery};
use axum::http::Uri;
use axum::middleware::{from_fn, Next};
use axum::response::Response;
use axum::Router;

use crate::http::response::not_found;

/// Wrap `inner` so `prefix` is stripped from the request path before
/// matching.
pub fn strip(inner: Router, prefix: String) -> Router {
    inner.layer(from_fn(move |req: Request, next: Next| {
        let prefix = prefix.clone();
        async move { strip_and_forward(prefix, req, next).await }
    }))
}

async fn strip_and_forward(prefix: String, mut req: Request, next: Next) -> Response {
    let path = req.uri().path();
    let Some(rest) = path.strip_prefix(prefix.as_str()) else {
        return not_found();
    };

    let stripped = if rest.is_empty() { "/" } else { rest };
    let path_and_query = match req.uri().query() {
        Some(query) => format!("{stripped}?{query}"),
        None => stripped.to_string(),
    };

    match rewrite(req.uri(), &path_and_query) {
        Some(uri) => {
            *req.uri_mut() = uri;
            next.run(req).await
        }
        // A remainder that no longer forms a valid path cannot match any
        // route.
        None => not_found(),
    }
}

fn rewrite(uri: &Uri, path_and_query: &str) -> Option<Uri> {
    let mut parts = Parts::default();
    parts.scheme = uri.scheme().cloned();
    parts.authority = uri.authority().cloned();
    parts.path_and_query = Some(path_and_query.parse::<PathAndQuery>().ok()?);
    Uri::from_parts(parts).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    /// Router whose fallback echoes the path (and query) it received.
    fn echo_router() -> Router {
        Router::new().fallback(|req: Request| async move {
            match req.uri().query() {
                Some(query) => format!("{}?{}", req.uri().path(), query),
                None => req.uri().path().to_string(),
            }
        })
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn send(app: Router, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(req).await.unwrap()
    }

    #[tokio::test]
    async fn strips_exactly_the_prefix() {
        let app = strip(echo_router(), "/api".into());
        let response = send(app, "/api/items").await;
        assert_eq!(body_text(response).await, "/items");
    }

    #[tokio::test]
    async fn path_outside_the_prefix_is_404() {
        let app = strip(echo_router(), "/api".into());
        let response = send(app, "/other/items").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bare_prefix_becomes_root() {
        let app = strip(echo_router(), "/api".into());
        let response = send(app, "/api").await;
        assert_eq!(body_text(response).await, "/");
    }

    #[tokio::test]
    async fn query_string_survives_stripping() {
        let app = strip(echo_router(), "/api".into());
        let response = send(app, "/api/items?page=2").await;
        assert_eq!(body_text(response).await, "/items?page=2");
    }
}

//! Cross-origin resource sharing.
//!
//! Permissive policy: the request origin and headers are mirrored back with
//! credentials allowed, which is what a wildcard-origin-with-credentials
//! configuration negotiates on the wire. Preflight `OPTIONS` requests are
//! answered by the layer and never reach the router.

use axum::http::Method;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

/// Verb set advertised on preflight responses.
pub const ALLOWED_METHODS: [Method; 5] = [
    Method::OPTIONS,
    Method::GET,
    Method::PUT,
    Method::POST,
    Method::DELETE,
];

/// Permissive CORS layer applied adjacent to the router.
pub fn permissive() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::body::Body;
    use axum::extract::Request;
    use axum::http::StatusCode;
    use axum::Router;
    use tower::ServiceExt;

    fn counting_router(hits: Arc<AtomicUsize>) -> Router {
        Router::new()
            .fallback(move || {
                let hits = Arc::clone(&hits);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    "inner"
                }
            })
            .layer(permissive())
    }

    #[tokio::test]
    async fn preflight_short_circuits_before_the_router() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = counting_router(Arc::clone(&hits));

        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/items")
            .header("Origin", "http://example.com")
            .header("Access-Control-Request-Method", "GET")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        let headers = response.headers();
        assert_eq!(
            headers.get("access-control-allow-origin").unwrap(),
            "http://example.com"
        );
        assert_eq!(
            headers.get("access-control-allow-credentials").unwrap(),
            "true"
        );
        let methods = headers
            .get("access-control-allow-methods")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("GET"));
        assert!(methods.contains("DELETE"));
    }

    #[tokio::test]
    async fn plain_requests_reach_the_router_with_cors_headers() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = counting_router(Arc::clone(&hits));

        let req = Request::builder()
            .uri("/items")
            .header("Origin", "http://example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "http://example.com"
        );
    }
}

//! Request logging layer.
//!
//! Outermost layer of the chain: logs every request before any other
//! processing and never rejects.

use axum::extract::Request;
use axum::middleware::{from_fn, Next};
use axum::response::Response;
use axum::Router;

/// Wrap `inner` so every request is logged on arrival.
pub fn log_requests(inner: Router) -> Router {
    inner.layer(from_fn(log_request))
}

async fn log_request(req: Request, next: Next) -> Response {
    tracing::debug!(
        method = %req.method(),
        path = %req.uri().path(),
        "handling request"
    );
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    #[tokio::test]
    async fn passes_requests_through_unchanged() {
        let app = log_requests(Router::new().fallback(|| async { "ok" }));
        let req = Request::builder().uri("/any").body(Body::empty()).unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

//! Response builders and the request-cycle error helper.

use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};

/// 404 response used when no route matches.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "No matching route found").into_response()
}

/// 405 response advertising the allowed methods for the matched path.
pub fn method_not_allowed<'a>(allowed: impl Iterator<Item = &'a Method>) -> Response {
    let allow = allowed.map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, allow)],
        "Method Not Allowed",
    )
        .into_response()
}

/// Map a handler error to a logged 400 response.
///
/// Handlers propagate failures with `?` and stay inside the request cycle;
/// nothing here ever reaches the server lifecycle.
///
/// ```
/// use axum::response::Response;
/// use rest_server::http::response::check_error;
///
/// async fn double(body: String) -> Result<String, Response> {
///     let n: i64 = check_error(body.trim().parse())?;
///     Ok((n * 2).to_string())
/// }
/// ```
pub fn check_error<T, E: std::fmt::Display>(result: Result<T, E>) -> Result<T, Response> {
    result.map_err(|err| {
        tracing::error!(error = %err, "request failed");
        (StatusCode::BAD_REQUEST, "Bad Request").into_response()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_404() {
        assert_eq!(not_found().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn method_not_allowed_lists_methods() {
        let methods = [Method::GET, Method::PUT];
        let response = method_not_allowed(methods.iter());
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET, PUT");
    }

    #[test]
    fn check_error_passes_ok_through() {
        let value = "7".parse::<u32>();
        assert_eq!(check_error(value).unwrap(), 7);
    }

    #[test]
    fn check_error_maps_to_bad_request() {
        let value: Result<u32, _> = "x".parse::<u32>();
        let response = check_error(value).unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

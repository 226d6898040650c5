// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Response headers for a JSON-only API.
//!
//! Nothing served here is meant to be rendered or framed, so the policy
//! is the same for every response. Anything under `/api` is per-user
//! data and must not be stored by caches.

use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

const API_PREFIX: &str = "/api/";

const HARDENING: [(HeaderName, &str); 5] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (
        header::CONTENT_SECURITY_POLICY,
        "default-src 'none'; frame-ancestors 'none'; sandbox",
    ),
    (header::REFERRER_POLICY, "no-referrer"),
    (
        header::STRICT_TRANSPORT_SECURITY,
        "max-age=31536000; includeSubDomains",
    ),
];

pub async fn json_api_headers(req: Request, next: Next) -> Response {
    let user_data = req.uri().path().starts_with(API_PREFIX);
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for (name, value) in HARDENING {
        headers.insert(name, HeaderValue::from_static(value));
    }
    if user_data && !headers.contains_key(header::CACHE_CONTROL) {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::{routing::get, Router};
    use tower::ServiceExt; // for oneshot

    fn app() -> Router {
        Router::new()
            .route("/health", get(|| async { "ok" }))
            .route("/api/habits", get(|| async { "[]" }))
            .route(
                "/api/cached",
                get(|| async { ([(header::CACHE_CONTROL, "max-age=60")], "{}") }),
            )
            .layer(axum::middleware::from_fn(json_api_headers))
    }

    async fn headers_for(uri: &str) -> axum::http::HeaderMap {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .headers()
            .clone()
    }

    #[tokio::test]
    async fn test_hardening_on_every_response() {
        for uri in ["/health", "/api/habits", "/missing"] {
            let headers = headers_for(uri).await;
            for (name, value) in HARDENING {
                assert_eq!(headers.get(&name).unwrap(), value, "{} on {}", name, uri);
            }
        }
    }

    #[tokio::test]
    async fn test_no_store_only_under_api() {
        assert_eq!(
            headers_for("/api/habits").await.get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
        assert!(headers_for("/health").await.get(header::CACHE_CONTROL).is_none());
    }

    #[tokio::test]
    async fn test_handler_cache_control_is_kept() {
        assert_eq!(
            headers_for("/api/cached").await.get(header::CACHE_CONTROL).unwrap(),
            "max-age=60"
        );
    }
}

//! Shared utilities for integration testing: disposable mock targets.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use http_body_util::BodyExt;
use tokio::net::TcpListener;

/// Serve a router on an ephemeral localhost port and return the address.
pub async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Upstream that reports what it saw — method, Host header, probe header,
/// body length — and echoes the body back.
pub fn echo_router() -> Router {
    async fn echo(request: Request<Body>) -> Response {
        let (parts, body) = request.into_parts();
        let bytes = body.collect().await.unwrap().to_bytes();

        let mut headers = HeaderMap::new();
        headers.insert("x-echo-method", parts.method.as_str().parse().unwrap());
        headers.insert("x-echo-body-len", bytes.len().to_string().parse().unwrap());
        if let Some(host) = parts.headers.get(header::HOST) {
            headers.insert("x-echo-host", host.clone());
        }
        if let Some(probe) = parts.headers.get("x-probe") {
            headers.insert("x-echo-probe", probe.clone());
        }

        (StatusCode::OK, headers, bytes).into_response()
    }

    Router::new().fallback(echo)
}

/// Upstream that counts how many times it was reached. Tests point rejected
/// requests at it and assert the count stayed at zero.
#[allow(dead_code)]
pub fn counting_router(counter: Arc<AtomicU32>) -> Router {
    Router::new().fallback(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            "hit"
        }
    })
}

/// Upstream that answers after a fixed delay.
#[allow(dead_code)]
pub fn slow_router(delay: Duration) -> Router {
    Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        "slow"
    })
}

/// Upstream with fixed routes exercising verbatim relay: a distinctive
/// status + header + body, a plain 404, and a redirect whose Location must
/// pass through unrewritten.
#[allow(dead_code)]
pub fn fixture_router() -> Router {
    Router::new()
        .route(
            "/teapot",
            get(|| async {
                (
                    StatusCode::IM_A_TEAPOT,
                    [("x-upstream-flavor", "oolong")],
                    "short and stout",
                )
            }),
        )
        .route(
            "/redirect",
            get(|| async { Redirect::temporary("http://upstream.invalid/elsewhere") }),
        )
        .route(
            "/tagged",
            get(|| async { ([("x-request-id", "upstream-tagged")], "tagged") }),
        )
}

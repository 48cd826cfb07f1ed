//! Outbound request construction, execution, and response relay.
//!
//! # Responsibilities
//! - Build the outbound request from the inbound one plus the resolved target
//! - Execute it with a per-request deadline
//! - Hand back the streaming response, or a `ForwardError`
//!
//! # Design Decisions
//! - `build_outbound` is a pure function; the forwarder holds only the shared
//!   client and the deadline, nothing per-request
//! - Headers pass through verbatim (authorization and cookies included — the
//!   proxy is transparent, not a security boundary) except Host, which is
//!   re-derived from the target, and body-framing headers when the body is
//!   dropped for GET/HEAD
//! - An upstream 4xx/5xx is a normal relay; only transport failures are errors

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, request, Method, Request, Response};
use hyper::body::Incoming;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::config::schema::{ForwarderConfig, TimeoutConfig};
use crate::proxy::error::{ClientError, ForwardError};
use crate::proxy::target::TargetDescriptor;
use crate::proxy::tls;

/// Executes proxied calls against resolved targets.
///
/// Holds the pooled outbound client; all per-request state lives on the
/// handler's stack. Connection pooling is keyed by scheme and authority, so
/// nothing request-scoped can leak between unrelated callers.
pub struct Forwarder {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    upstream_timeout: Duration,
}

impl Forwarder {
    /// Create a forwarder from configuration.
    pub fn new(config: &ForwarderConfig, timeouts: &TimeoutConfig) -> Result<Self, ClientError> {
        let connector = tls::https_connector(config.insecure_skip_verify)?;
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            client,
            upstream_timeout: Duration::from_secs(timeouts.upstream_secs),
        })
    }

    /// Issue the outbound call and return the streaming response.
    ///
    /// Dropping the returned future (caller disconnected) cancels the
    /// outbound call and releases its connection.
    pub async fn forward(
        &self,
        parts: &request::Parts,
        body: Body,
        target: &TargetDescriptor,
    ) -> Result<Response<Incoming>, ForwardError> {
        let outbound = build_outbound(parts, body, target);

        match tokio::time::timeout(self.upstream_timeout, self.client.request(outbound)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(source)) => Err(ForwardError::Unreachable(source)),
            Err(_) => Err(ForwardError::TimedOut(self.upstream_timeout)),
        }
    }
}

/// Methods that never carry a body through the proxy.
fn drops_body(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD)
}

/// Build the outbound request. Pure function of (inbound parts, body, target).
///
/// The inbound body is omitted entirely for GET/HEAD — along with its framing
/// headers, which the transport recomputes — and passed through unchanged for
/// every other method, zero-length bodies included.
pub fn build_outbound(
    parts: &request::Parts,
    body: Body,
    target: &TargetDescriptor,
) -> Request<Body> {
    let drop_body = drops_body(&parts.method);

    let mut outbound = Request::new(if drop_body { Body::empty() } else { body });
    *outbound.method_mut() = parts.method.clone();
    *outbound.uri_mut() = target.uri().clone();

    let headers = outbound.headers_mut();
    for (name, value) in &parts.headers {
        if name == header::HOST {
            continue;
        }
        if drop_body && (name == header::CONTENT_LENGTH || name == header::TRANSFER_ENCODING) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    // Sending the caller's Host to the new destination breaks virtual-host
    // routing and TLS SNI; always use the target's.
    headers.insert(header::HOST, target.host_header().clone());

    outbound
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn inbound(method: Method, body: Body) -> (request::Parts, Body) {
        let request = Request::builder()
            .method(method)
            .uri("http://proxy.local/proxy?url=http://example.test/x")
            .header("host", "proxy.local")
            .header("x-probe", "alpha")
            .header("x-probe", "beta")
            .header("authorization", "Bearer secret")
            .header("content-length", "4")
            .body(body)
            .unwrap();
        request.into_parts()
    }

    fn target() -> TargetDescriptor {
        TargetDescriptor::parse("http://example.test:8081/x?y=z").unwrap()
    }

    #[test]
    fn test_host_header_is_rewritten_to_target() {
        let (parts, body) = inbound(Method::POST, Body::from("ping"));
        let outbound = build_outbound(&parts, body, &target());

        assert_eq!(
            outbound.headers().get(header::HOST),
            Some(&HeaderValue::from_static("example.test:8081"))
        );
        assert_eq!(
            outbound.uri().to_string(),
            "http://example.test:8081/x?y=z"
        );
    }

    #[test]
    fn test_headers_pass_through_including_repeats() {
        let (parts, body) = inbound(Method::POST, Body::from("ping"));
        let outbound = build_outbound(&parts, body, &target());

        let probes: Vec<_> = outbound.headers().get_all("x-probe").iter().collect();
        assert_eq!(probes, vec!["alpha", "beta"]);
        assert_eq!(
            outbound.headers().get("authorization"),
            Some(&HeaderValue::from_static("Bearer secret"))
        );
        assert_eq!(outbound.headers().get(header::CONTENT_LENGTH).unwrap(), "4");
    }

    #[tokio::test]
    async fn test_get_drops_body_and_framing_headers() {
        let (parts, body) = inbound(Method::GET, Body::from("ping"));
        let outbound = build_outbound(&parts, body, &target());

        assert!(outbound.headers().get(header::CONTENT_LENGTH).is_none());
        assert!(outbound.headers().get(header::TRANSFER_ENCODING).is_none());
        let bytes = axum::body::to_bytes(outbound.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_head_drops_body() {
        let (parts, body) = inbound(Method::HEAD, Body::from("ping"));
        let outbound = build_outbound(&parts, body, &target());

        let bytes = axum::body::to_bytes(outbound.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_post_body_passes_through_unchanged() {
        let (parts, body) = inbound(Method::POST, Body::from("ping"));
        let outbound = build_outbound(&parts, body, &target());

        assert_eq!(outbound.method(), Method::POST);
        let bytes = axum::body::to_bytes(outbound.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ping");
    }

    #[tokio::test]
    async fn test_zero_length_body_is_still_sent() {
        let (parts, body) = inbound(Method::PUT, Body::empty());
        let outbound = build_outbound(&parts, body, &target());

        // Framing headers survive for body-carrying methods.
        assert_eq!(outbound.headers().get(header::CONTENT_LENGTH).unwrap(), "4");
        let bytes = axum::body::to_bytes(outbound.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }
}

//! Per-request error taxonomy.
//!
//! Resolution failures are the caller's fault and map to 400; transport
//! failures reaching the target map to 502. An upstream 4xx/5xx is not an
//! error at all — it is relayed verbatim.

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

/// Failure to produce a target from the inbound request.
///
/// All variants short-circuit before any outbound call is attempted.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The designated query parameter was absent or empty.
    #[error("missing or empty `{0}` query parameter")]
    MissingTarget(String),

    /// The parameter value did not parse as an absolute URL.
    #[error("target is not a valid absolute URL: {0}")]
    InvalidTarget(String),

    /// The URL parsed but its scheme is not http or https.
    #[error("target scheme `{0}` is not allowed; only http and https are supported")]
    DisallowedScheme(String),
}

impl ResolveError {
    /// Status returned to the original caller.
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

/// Failure executing the outbound call.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// DNS, connect, or TLS failure talking to the target.
    #[error("upstream unreachable: {0}")]
    Unreachable(hyper_util::client::legacy::Error),

    /// The target did not answer within the configured deadline. Reported
    /// the same way as an unreachable target.
    #[error("upstream unreachable: no response within {0:?}")]
    TimedOut(Duration),
}

impl ForwardError {
    /// Status returned to the original caller.
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_GATEWAY
    }
}

/// Failure constructing the outbound HTTPS client at startup.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to load native root certificates: {0}")]
    NativeRoots(#[from] std::io::Error),

    #[error("invalid TLS client configuration: {0}")]
    Tls(#[from] rustls::Error),
}

//! Target resolution: query string → validated destination.
//!
//! # Responsibilities
//! - Read the designated parameter from the raw query string
//! - Parse it as an absolute URL and restrict the scheme to http/https
//! - Derive the values the forwarder needs (URI, Host header)
//!
//! # Design Decisions
//! - Pure function of the query string; no I/O, no shared state
//! - No normalization beyond what URL parsing itself performs (no added
//!   trailing-slash handling, no extra percent-decoding)
//! - `TargetDescriptor` cannot exist without having passed validation

use axum::http::{HeaderValue, Uri};
use url::Url;

use crate::proxy::error::ResolveError;

/// A validated absolute http/https URL to forward a request to.
///
/// Construction through [`TargetDescriptor::parse`] is the only place
/// validation occurs.
#[derive(Debug, Clone)]
pub struct TargetDescriptor {
    url: Url,
    uri: Uri,
    host: HeaderValue,
}

impl TargetDescriptor {
    /// Parse and validate a candidate target URL.
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let url = Url::parse(raw).map_err(|e| ResolveError::InvalidTarget(e.to_string()))?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(ResolveError::DisallowedScheme(other.to_string())),
        }

        let host = match url.host_str() {
            Some(host) => host,
            None => return Err(ResolveError::InvalidTarget("URL has no host".to_string())),
        };

        // The Host header carries the port only when it is non-default;
        // Url::port() already returns None for scheme defaults.
        let host_header = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        let host = HeaderValue::from_str(&host_header)
            .map_err(|e| ResolveError::InvalidTarget(e.to_string()))?;

        let uri: Uri = url
            .as_str()
            .parse()
            .map_err(|e: axum::http::uri::InvalidUri| ResolveError::InvalidTarget(e.to_string()))?;

        Ok(Self { url, uri, host })
    }

    /// Full request URI (origin + path + query).
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Value for the outbound Host header.
    pub fn host_header(&self) -> &HeaderValue {
        &self.host
    }

    /// The validated URL, for logging.
    pub fn as_url(&self) -> &Url {
        &self.url
    }
}

/// Extract and validate the target from a raw query string.
///
/// `param` is the configured parameter name ("url" or "target").
pub fn resolve_target(
    query: Option<&str>,
    param: &str,
) -> Result<TargetDescriptor, ResolveError> {
    let raw = query.and_then(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(name, _)| name == param)
            .map(|(_, value)| value.into_owned())
    });

    match raw {
        Some(value) if !value.is_empty() => TargetDescriptor::parse(&value),
        _ => Err(ResolveError::MissingTarget(param.to_string())),
    }
}

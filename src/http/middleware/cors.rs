//! CORS header injection.
//! Every response gets the wildcard-origin header set; OPTIONS requests are
//! answered directly with 200 and never reach the proxy core.
//!
//! Hand-written rather than `tower_http::cors` because that layer rejects the
//! wildcard-origin + allow-credentials combination this proxy deliberately
//! emits.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::schema::CorsConfig;

/// Prebuilt header values for the configured allow-lists.
#[derive(Clone)]
pub struct CorsSettings {
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl CorsSettings {
    /// Build header values once at startup; the allow-lists are joined with
    /// ", " as they appear on the wire.
    pub fn from_config(config: &CorsConfig) -> Self {
        Self {
            allow_methods: joined_header_value(&config.allow_methods, "GET, POST, PUT, DELETE"),
            allow_headers: joined_header_value(&config.allow_headers, "*"),
        }
    }

    fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            self.allow_methods.clone(),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            self.allow_headers.clone(),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
    }
}

fn joined_header_value(values: &[String], fallback: &'static str) -> HeaderValue {
    HeaderValue::from_str(&values.join(", ")).unwrap_or_else(|_| HeaderValue::from_static(fallback))
}

/// Inject CORS headers on every response; short-circuit OPTIONS preflight.
pub async fn cors_middleware(
    State(settings): State<CorsSettings>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::OK.into_response();
        settings.apply(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    settings.apply(response.headers_mut());
    response
}

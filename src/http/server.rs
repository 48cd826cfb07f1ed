//! HTTP server setup and the proxy entry point.
//!
//! # Responsibilities
//! - Create the Axum router: every method on every path hits the proxy handler
//! - Wire up middleware (request ID, access log trace, CORS, total timeout)
//! - Resolve the target, dispatch to the forwarder, relay the outcome
//! - Graceful shutdown via the lifecycle coordinator

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, Response},
    middleware,
    response::IntoResponse,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::schema::ProxyConfig;
use crate::http::middleware::cors::{cors_middleware, CorsSettings};
use crate::http::middleware::request_id::{request_id_middleware, X_REQUEST_ID};
use crate::proxy::error::ClientError;
use crate::proxy::forwarder::Forwarder;
use crate::proxy::target::resolve_target;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
    pub target_param: Arc<str>,
}

/// HTTP server for the forwarding proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &ProxyConfig) -> Result<Self, ClientError> {
        let forwarder = Arc::new(Forwarder::new(&config.forwarder, &config.timeouts)?);
        let state = AppState {
            forwarder,
            target_param: config.forwarder.target_param.as_str().into(),
        };

        Ok(Self {
            router: Self::build_router(config, state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let cors = CorsSettings::from_config(&config.cors);

        // Top of the builder is the outermost layer: IDs first so the access
        // log can correlate, CORS outside the timeout so even 408s carry the
        // headers.
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(middleware::from_fn(request_id_middleware))
                    .layer(TraceLayer::new_for_http())
                    .layer(middleware::from_fn_with_state(cors, cors_middleware))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server, accepting connections on the given listener until the
    /// shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler.
/// Resolves the target from the query string and relays the forwarded call.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response<Body> {
    let (parts, body) = request.into_parts();

    let request_id = parts
        .headers
        .get(X_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    // Resolution failures short-circuit before any outbound call.
    let target = match resolve_target(parts.uri.query(), &state.target_param) {
        Ok(target) => target,
        Err(error) => {
            tracing::debug!(
                request_id = %request_id,
                method = %parts.method,
                error = %error,
                "Rejected proxy request"
            );
            return (error.status(), error.to_string()).into_response();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        target = %target.as_url(),
        "Forwarding request"
    );

    match state.forwarder.forward(&parts, body, &target).await {
        Ok(response) => {
            tracing::debug!(
                request_id = %request_id,
                status = %response.status(),
                "Relaying upstream response"
            );
            // Stream the body through; no buffering.
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(error) => {
            tracing::warn!(
                request_id = %request_id,
                target = %target.as_url(),
                error = %error,
                "Upstream request failed"
            );
            (error.status(), error.to_string()).into_response()
        }
    }
}

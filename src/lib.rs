//! Dynamic HTTP Forwarding Proxy Library
//!
//! A single endpoint accepts any request, reads the destination URL from a
//! query parameter, re-issues an equivalent request against that destination,
//! and relays the response back to the caller.
//!
//! ```text
//!     Client Request ──▶ http::server ──▶ proxy::target ──▶ proxy::forwarder ──▶ Target
//!                                                                                  │
//!     Client Response ◀────── status / headers / streamed body relay ◀─────────────┘
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

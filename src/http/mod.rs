//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, any method / any path → proxy handler)
//!     → middleware/ (request ID, access log trace, CORS, total timeout)
//!     → proxy::target + proxy::forwarder (the core)
//!     → streamed relay back to the client
//! ```

pub mod middleware;
pub mod server;

pub use server::HttpServer;

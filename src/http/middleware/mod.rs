//! Cross-cutting middleware applied around the proxy handler.

pub mod cors;
pub mod request_id;

pub use cors::{cors_middleware, CorsSettings};
pub use request_id::{request_id_middleware, X_REQUEST_ID};

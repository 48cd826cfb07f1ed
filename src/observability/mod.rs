//! Observability subsystem.
//!
//! Structured logging only: access logs come from `tower_http`'s trace layer,
//! application events from `tracing` macros with the request ID attached.

pub mod logging;

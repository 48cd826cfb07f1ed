//! Core request-forwarding path.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → target.rs (extract & validate destination URL from the query string)
//!     → forwarder.rs (build outbound request, execute, stream response back)
//!     → error.rs (per-request failure taxonomy, mapped to statuses at the edge)
//! ```
//!
//! # Design Decisions
//! - Validation happens exactly once, inside `TargetDescriptor::parse`
//! - The outbound request is a pure function of (inbound parts, body, target);
//!   nothing is mutated in place and nothing survives the request
//! - The forwarder returns a value and never writes to the caller directly

pub mod error;
pub mod forwarder;
pub mod target;
mod tls;

pub use error::{ClientError, ForwardError, ResolveError};
pub use forwarder::Forwarder;
pub use target::{resolve_target, TargetDescriptor};

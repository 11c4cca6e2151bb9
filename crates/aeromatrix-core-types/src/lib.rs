//! Core types shared across AeroMatrix crates
//!
//! - **Correlation types**: RequestId, TraceId, RequestContext (with the acting principal)
//! - **Schema constants**: Canonical field keys and event names for structured logging

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId, TraceId};

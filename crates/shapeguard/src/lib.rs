//! Structural validation of JSON request payloads.
//!
//! A payload is decoded in two phases (syntax, then shape) and the typed
//! result is checked for required fields, with every fault reported under
//! its full field path.
//!
//! # Crate Structure
//!
//! - [`schema`]: record descriptors, emptiness rules, the structural validator
//! - [`decode`]: two-phase decoding and the request orchestrator
//! - [`request`]: body reading and the validate-then-process flow
//! - [`envelope`]: the error response returned to callers
//! - [`order`]: the order request shape
//! - [`config`]: request handling limits

pub mod config;
pub mod envelope;
pub mod order;
pub mod request;

/// Re-export schema types.
pub mod schema {
    pub use shapeguard_schema::*;
}

/// Re-export decode types.
pub mod decode {
    pub use shapeguard_decode::*;
}

pub use config::RequestConfig;
pub use envelope::{EnvelopeEntry, ErrorEnvelope};
pub use order::{OrderBody, OrderItem, OrderRequest, OrderSummary};
pub use request::{accept_request, handle_request, read_body, RequestError};
pub use shapeguard_decode::validate_request;
pub use shapeguard_schema::{record, validate, validate_record, ValidationError, ValidationErrors};

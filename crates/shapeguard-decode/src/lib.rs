//! Turn untrusted JSON bytes into a validated, typed record.
//!
//! Decoding happens in two phases (syntax, then shape) and stops at the
//! first decode fault. A decoded value is then checked for required fields
//! by [`shapeguard_schema`]. [`validate_request`] runs the whole pipeline.

pub mod decoder;
pub mod error;
pub mod orchestrator;

pub use decoder::{decode, decode_tree, parse};
pub use error::{DecodeError, Result, BODY_FIELD};
pub use orchestrator::validate_request;

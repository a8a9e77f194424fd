//! Structural validation of decoded records.
//!
//! Describe a record's shape once with [`record!`], then check any value of
//! that type for missing required fields. Nested records and sequences of
//! records are walked recursively and every fault is reported with a
//! dot/bracket-qualified path such as `order.items[2].quantity`.

mod macros;

pub mod descriptor;
pub mod empty;
pub mod error;
pub mod registry;
pub mod validator;

pub use descriptor::{
    FieldDescriptor, FieldKind, FieldSpec, FieldValue, Record, Schema, SchemaPath,
    DEFAULT_MAX_DEPTH,
};
pub use empty::is_empty;
pub use error::{ErrorCode, Result, SchemaError, ValidationError, ValidationErrors};
pub use registry::SchemaRegistry;
pub use validator::{validate, validate_record};

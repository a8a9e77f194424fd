use std::fmt;

use serde::Serialize;

/// Errors raised when the validator is used against something it cannot walk.
///
/// These are caller defects, not validation outcomes: a payload never
/// produces one.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The top-level value handed to the validator is not a record.
    #[error("validator: expected a record, got {type_name}")]
    NotARecord { type_name: &'static str },
}

pub type Result<T> = std::result::Result<T, SchemaError>;

/// Machine-readable category of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Payload is not valid JSON.
    JsonFormat,
    /// A field holds a JSON value of the wrong type.
    TypeMismatch,
    /// The payload shape cannot be decoded and no single field is to blame.
    InvalidStructure,
    /// A required field is absent or empty.
    Required,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::JsonFormat => "json_format",
            ErrorCode::TypeMismatch => "type_mismatch",
            ErrorCode::InvalidStructure => "invalid_structure",
            ErrorCode::Required => "required",
        }
    }

    /// Decode-stage codes stop processing; `required` is collected.
    pub fn is_fatal(self) -> bool {
        !matches!(self, ErrorCode::Required)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single fault found in a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Dot/bracket-qualified path, e.g. `order.items[2].quantity`.
    pub field: String,
    pub message: String,
    pub code: ErrorCode,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, "this field is required", ErrorCode::Required)
    }

    /// Re-root this error under `prefix`, keeping message and code.
    pub(crate) fn nested_under(self, prefix: &str) -> Self {
        Self {
            field: format!("{prefix}.{}", self.field),
            ..self
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Ordered list of independent faults. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl Extend<ValidationError> for ValidationErrors {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

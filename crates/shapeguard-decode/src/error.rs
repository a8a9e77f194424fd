use shapeguard_schema::{ErrorCode, ValidationError, ValidationErrors};

/// Field name used for faults that concern the whole payload.
pub const BODY_FIELD: &str = "body";

/// Errors that can occur while turning raw bytes into a typed value.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The payload is not syntactically valid JSON.
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// A field holds a JSON value of the wrong type.
    #[error("type mismatch at {field}: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// The payload is valid JSON but cannot be decoded into the target shape.
    #[error("payload does not match the request structure: {0}")]
    InvalidStructure(String),
}

impl DecodeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::InvalidJson(_) => ErrorCode::JsonFormat,
            DecodeError::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            DecodeError::InvalidStructure(_) => ErrorCode::InvalidStructure,
        }
    }

    /// Client-facing form of this error.
    pub fn to_validation_error(&self) -> ValidationError {
        match self {
            DecodeError::InvalidJson(_) => {
                ValidationError::new(BODY_FIELD, "Invalid JSON format", self.code())
            }
            DecodeError::TypeMismatch {
                field,
                expected,
                actual,
            } => ValidationError::new(
                field.clone(),
                format!("expected {expected}, got {actual}"),
                self.code(),
            ),
            DecodeError::InvalidStructure(_) => {
                ValidationError::new(BODY_FIELD, "Invalid request structure", self.code())
            }
        }
    }
}

impl From<DecodeError> for ValidationErrors {
    fn from(err: DecodeError) -> Self {
        ValidationErrors::from(err.to_validation_error())
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;

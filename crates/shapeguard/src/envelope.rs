use std::fmt;

use serde::Serialize;
use shapeguard_schema::{ValidationError, ValidationErrors};

pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

pub const READ_ERROR: &str = "READ_ERROR";
pub const PROCESSING_ERROR: &str = "PROCESSING_ERROR";

/// One entry of an [`ErrorEnvelope`].
///
/// Validation faults keep their snake_case code (`required`,
/// `type_mismatch`, ...); faults raised outside validation use upper-case
/// codes such as [`READ_ERROR`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvelopeEntry {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl EnvelopeEntry {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

impl From<&ValidationError> for EnvelopeEntry {
    fn from(err: &ValidationError) -> Self {
        Self::new(err.field.clone(), err.message.clone(), err.code.as_str())
    }
}

/// Error response handed back to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EnvelopeEntry>,
}

impl ErrorEnvelope {
    /// The payload failed decoding or structural validation.
    pub fn invalid_request(errors: &ValidationErrors) -> Self {
        Self {
            status: STATUS_BAD_REQUEST,
            message: "Invalid request".to_string(),
            errors: errors.iter().map(EnvelopeEntry::from).collect(),
        }
    }

    /// The body could not be read at all.
    pub fn read_failure() -> Self {
        Self {
            status: STATUS_BAD_REQUEST,
            message: "Failed to read request body".to_string(),
            errors: vec![EnvelopeEntry::new(
                "body",
                "Could not read request body",
                READ_ERROR,
            )],
        }
    }

    /// A validated request was rejected by the processing step.
    pub fn processing_failure(field: &str, reason: impl fmt::Display) -> Self {
        Self {
            status: STATUS_INTERNAL_ERROR,
            message: "Failed to process order".to_string(),
            errors: vec![EnvelopeEntry::new(
                field,
                reason.to_string(),
                PROCESSING_ERROR,
            )],
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.message)?;
        for entry in &self.errors {
            write!(f, "; {}: {} ({})", entry.field, entry.message, entry.code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use shapeguard_schema::ErrorCode;

    use super::*;

    #[test]
    fn invalid_request_carries_every_fault() {
        let errors: ValidationErrors = vec![
            ValidationError::required("order.items"),
            ValidationError::new("order.note", "expected a string, got number", ErrorCode::TypeMismatch),
        ]
        .into();

        let envelope = ErrorEnvelope::invalid_request(&errors);
        assert_eq!(envelope.status, 400);
        assert!(envelope.is_client_error());
        assert_eq!(
            envelope.to_json(),
            r#"{"status":400,"message":"Invalid request","errors":[{"field":"order.items","message":"this field is required","code":"required"},{"field":"order.note","message":"expected a string, got number","code":"type_mismatch"}]}"#
        );
    }

    #[test]
    fn read_failure_names_the_body() {
        let envelope = ErrorEnvelope::read_failure();
        assert_eq!(envelope.status, 400);
        assert_eq!(envelope.message, "Failed to read request body");
        assert_eq!(
            envelope.errors,
            vec![EnvelopeEntry::new(
                "body",
                "Could not read request body",
                "READ_ERROR"
            )]
        );
    }

    #[test]
    fn processing_failure_is_a_server_error() {
        let envelope = ErrorEnvelope::processing_failure("order", "total quantity overflows");
        assert_eq!(envelope.status, 500);
        assert!(!envelope.is_client_error());
        assert_eq!(envelope.errors[0].code, "PROCESSING_ERROR");
        assert_eq!(
            envelope.to_string(),
            "500 Failed to process order; order: total quantity overflows (PROCESSING_ERROR)"
        );
    }

    #[test]
    fn empty_error_list_is_omitted() {
        let envelope = ErrorEnvelope::invalid_request(&ValidationErrors::new());
        assert_eq!(envelope.to_json(), r#"{"status":400,"message":"Invalid request"}"#);
    }
}

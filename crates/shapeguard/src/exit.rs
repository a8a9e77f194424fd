use std::fmt;
use std::io;

use shapeguard::ErrorEnvelope;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
/// The payload was rejected.
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

/// Exit code for a rejected request: client faults are invalid data,
/// anything else is a plain failure.
pub fn envelope_code(envelope: &ErrorEnvelope) -> i32 {
    if envelope.is_client_error() {
        DATA_INVALID
    } else {
        FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_map_to_exit_codes() {
        let denied = io_error("open", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(denied.code, PERMISSION_DENIED);
        assert!(denied.message.starts_with("open: "));

        let missing = io_error("open", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(missing.code, FAILURE);

        let other = io_error("open", io::Error::other("boom"));
        assert_eq!(other.code, INTERNAL);
    }

    #[test]
    fn envelope_codes() {
        assert_eq!(envelope_code(&ErrorEnvelope::read_failure()), DATA_INVALID);
        assert_eq!(
            envelope_code(&ErrorEnvelope::processing_failure("order", "nope")),
            FAILURE
        );
    }
}

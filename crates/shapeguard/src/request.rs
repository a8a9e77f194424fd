use std::fmt;
use std::io::{self, Read};

use serde::de::DeserializeOwned;
use shapeguard_decode::validate_request;
use shapeguard_schema::{Record, ValidationErrors};
use tracing::{debug, warn};

use crate::config::RequestConfig;
use crate::envelope::ErrorEnvelope;

/// Errors that end the handling of a request.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("failed to read request body: {0}")]
    Read(#[source] io::Error),

    #[error("request body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("invalid request: {0}")]
    Rejected(ValidationErrors),

    /// The payload was valid but the processing step refused it.
    #[error("failed to process {field}: {reason}")]
    Processing { field: String, reason: String },
}

impl RequestError {
    pub fn processing(field: impl Into<String>, reason: impl fmt::Display) -> Self {
        RequestError::Processing {
            field: field.into(),
            reason: reason.to_string(),
        }
    }

    /// Client-facing response for this error.
    pub fn to_envelope(&self) -> ErrorEnvelope {
        match self {
            RequestError::Read(_) | RequestError::TooLarge { .. } => ErrorEnvelope::read_failure(),
            RequestError::Rejected(errors) => ErrorEnvelope::invalid_request(errors),
            RequestError::Processing { field, reason } => {
                ErrorEnvelope::processing_failure(field, reason)
            }
        }
    }
}

impl From<ValidationErrors> for RequestError {
    fn from(errors: ValidationErrors) -> Self {
        RequestError::Rejected(errors)
    }
}

impl From<RequestError> for ErrorEnvelope {
    fn from(err: RequestError) -> Self {
        err.to_envelope()
    }
}

pub type Result<T> = std::result::Result<T, RequestError>;

/// Read a whole body, refusing anything longer than `config.max_body_bytes`.
pub fn read_body<R: Read>(reader: R, config: &RequestConfig) -> Result<Vec<u8>> {
    let limit = config.max_body_bytes;
    // One byte past the limit tells an exact fit from an oversize body.
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    let mut body = Vec::new();
    reader
        .take(cap)
        .read_to_end(&mut body)
        .map_err(|err| {
            warn!(error = %err, "could not read request body");
            RequestError::Read(err)
        })?;

    if body.len() > limit {
        warn!(limit, "request body exceeds limit");
        return Err(RequestError::TooLarge { limit });
    }
    Ok(body)
}

/// Read and validate a request without processing it.
pub fn accept_request<T, R>(reader: R, config: &RequestConfig) -> Result<T>
where
    T: Record + DeserializeOwned + 'static,
    R: Read,
{
    let body = read_body(reader, config)?;
    let request = validate_request::<T>(&body)?;
    debug!(
        record = request.record_name(),
        bytes = body.len(),
        "request accepted"
    );
    Ok(request)
}

/// Read, validate and process a request.
///
/// `process` only ever sees a value that passed both decoding and
/// structural validation. Any failure along the way is turned into the
/// envelope a client would receive.
pub fn handle_request<T, O, R, F>(
    reader: R,
    config: &RequestConfig,
    process: F,
) -> std::result::Result<O, ErrorEnvelope>
where
    T: Record + DeserializeOwned + 'static,
    R: Read,
    F: FnOnce(T) -> Result<O>,
{
    accept_request::<T, R>(reader, config)
        .and_then(process)
        .map_err(|err| {
            debug!(error = %err, "request rejected");
            ErrorEnvelope::from(err)
        })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use serde::Deserialize;
    use shapeguard_schema::record;

    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Greeting {
        name: String,
    }

    record!(Greeting {
        #[required] name: String,
    });

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("simulated read error"))
        }
    }

    #[test]
    fn read_body_returns_all_bytes() {
        let body = read_body(&b"{\"name\":\"Alice\"}"[..], &RequestConfig::default()).unwrap();
        assert_eq!(body, b"{\"name\":\"Alice\"}");
    }

    #[test]
    fn read_body_accepts_exact_limit_and_rejects_more() {
        let config = RequestConfig::default().with_max_body_bytes(4);
        assert_eq!(read_body(&b"abcd"[..], &config).unwrap(), b"abcd");

        let err = read_body(&b"abcde"[..], &config).unwrap_err();
        assert!(matches!(err, RequestError::TooLarge { limit: 4 }));
    }

    #[test]
    fn read_body_with_unbounded_limit() {
        let config = RequestConfig::default().with_max_body_bytes(usize::MAX);
        let body = read_body(&b"{\"name\":\"x\"}"[..], &config).unwrap();
        assert_eq!(body, b"{\"name\":\"x\"}");

        let greeting: Greeting = accept_request(&body[..], &config).unwrap();
        assert_eq!(greeting.name, "x");
    }

    #[test]
    fn valid_request_reaches_processing() {
        let out = handle_request::<Greeting, _, _, _>(
            &br#"{"name":"Alice"}"#[..],
            &RequestConfig::default(),
            |greeting| Ok(format!("hello {}", greeting.name)),
        )
        .unwrap();
        assert_eq!(out, "hello Alice");
    }

    #[test]
    fn invalid_json_never_reaches_processing() {
        let called = Cell::new(false);
        let envelope = handle_request::<Greeting, (), _, _>(
            &b"{ invalid json }"[..],
            &RequestConfig::default(),
            |_| {
                called.set(true);
                Ok(())
            },
        )
        .unwrap_err();

        assert!(!called.get());
        assert_eq!(envelope.status, 400);
        assert_eq!(envelope.message, "Invalid request");
        assert_eq!(envelope.errors.len(), 1);
        assert_eq!(envelope.errors[0].field, "body");
        assert_eq!(envelope.errors[0].code, "json_format");
    }

    #[test]
    fn missing_required_field_never_reaches_processing() {
        let called = Cell::new(false);
        let envelope = handle_request::<Greeting, (), _, _>(
            &b"{}"[..],
            &RequestConfig::default(),
            |_| {
                called.set(true);
                Ok(())
            },
        )
        .unwrap_err();

        assert!(!called.get());
        assert_eq!(envelope.status, 400);
        assert_eq!(envelope.errors[0].field, "name");
        assert_eq!(envelope.errors[0].code, "required");
    }

    #[test]
    fn body_read_error_becomes_read_failure() {
        let envelope = handle_request::<Greeting, (), _, _>(
            FailingReader,
            &RequestConfig::default(),
            |_| Ok(()),
        )
        .unwrap_err();

        assert_eq!(envelope, ErrorEnvelope::read_failure());
    }

    #[test]
    fn oversize_body_becomes_read_failure() {
        let config = RequestConfig::default().with_max_body_bytes(8);
        let envelope = handle_request::<Greeting, (), _, _>(
            &br#"{"name":"a much longer name"}"#[..],
            &config,
            |_| Ok(()),
        )
        .unwrap_err();
        assert_eq!(envelope.errors[0].code, "READ_ERROR");
    }

    #[test]
    fn processing_error_becomes_server_error() {
        let envelope = handle_request::<Greeting, (), _, _>(
            &br#"{"name":"Mallory"}"#[..],
            &RequestConfig::default(),
            |greeting| Err(RequestError::processing("name", format!("{} is banned", greeting.name))),
        )
        .unwrap_err();

        assert_eq!(envelope.status, 500);
        assert_eq!(envelope.errors[0].field, "name");
        assert_eq!(envelope.errors[0].message, "Mallory is banned");
        assert_eq!(envelope.errors[0].code, "PROCESSING_ERROR");
    }
}

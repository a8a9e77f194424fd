use serde::de::DeserializeOwned;
use shapeguard_schema::{validate_record, Record, ValidationErrors};
use tracing::debug;

use crate::decoder::decode;

/// Decode and validate a request body in one call.
///
/// Decode failures are returned on their own, without running the
/// structural validator: a client sees either a single decode error or the
/// full list of structural faults, never a mix. The decoded value is only
/// returned when both stages pass.
pub fn validate_request<T>(raw: &[u8]) -> Result<T, ValidationErrors>
where
    T: Record + DeserializeOwned + 'static,
{
    let value: T = decode(raw)?;

    let errors = validate_record(&value);
    if !errors.is_empty() {
        debug!(
            record = value.record_name(),
            errors = errors.len(),
            first = %errors.as_slice()[0],
            "request failed structural validation"
        );
        return Err(errors);
    }
    Ok(value)
}

use tracing::trace;

use crate::descriptor::{FieldKind, FieldValue, Record};
use crate::empty::is_empty;
use crate::error::{Result, SchemaError, ValidationError, ValidationErrors};

/// Validate a value that must be a record.
///
/// Returns [`SchemaError::NotARecord`] for anything else; that is a caller
/// defect, never an outcome of the payload.
pub fn validate(value: &dyn FieldValue) -> Result<ValidationErrors> {
    let record = value.as_record().ok_or(SchemaError::NotARecord {
        type_name: value.type_name(),
    })?;
    Ok(validate_record(record))
}

/// Check required fields and descend into nested records and sequences of
/// records, collecting every fault.
///
/// Errors follow field declaration order, then element order.
pub fn validate_record(record: &dyn Record) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for field in record.fields() {
        let name = field.name();
        let value = field.value();

        if field.required() && is_empty(value) {
            errors.push(ValidationError::required(name));
        }

        match field.kind() {
            FieldKind::Record => {
                if let Some(nested) = value.as_record() {
                    errors.extend(
                        validate_record(nested)
                            .into_iter()
                            .map(|err| err.nested_under(name)),
                    );
                }
            }
            FieldKind::RecordSequence => {
                for (index, element) in value.element_records() {
                    let prefix = format!("{name}[{index}]");
                    errors.extend(
                        validate_record(element)
                            .into_iter()
                            .map(|err| err.nested_under(&prefix)),
                    );
                }
            }
            FieldKind::Primitive | FieldKind::PrimitiveSequence => {}
        }
    }

    trace!(
        record = record.record_name(),
        errors = errors.len(),
        "validated record"
    );
    errors
}

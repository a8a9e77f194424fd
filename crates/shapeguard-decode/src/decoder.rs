use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_path_to_error::{Path, Segment};
use shapeguard_schema::{FieldKind, Record, Schema, SchemaRegistry};
use tracing::debug;

use crate::error::{DecodeError, Result};

/// Decode raw bytes into `T` in two phases.
///
/// The syntax phase parses the bytes as an untyped JSON tree; a failure
/// there is reported as [`DecodeError::InvalidJson`] and nothing else runs.
/// The shape phase reads that tree into `T`, tracking the field path so a
/// type mismatch names the offending field.
///
/// Success says nothing about required fields; run the structural
/// validator on the result.
pub fn decode<T>(raw: &[u8]) -> Result<T>
where
    T: Record + DeserializeOwned + 'static,
{
    let tree = parse(raw)?;
    decode_tree(&tree)
}

/// Syntax phase: parse into an untyped JSON tree.
pub fn parse(raw: &[u8]) -> Result<Value> {
    serde_json::from_slice(raw).map_err(|err| {
        debug!(error = %err, "payload rejected: malformed JSON");
        DecodeError::InvalidJson(err)
    })
}

/// Shape phase, for callers that already hold a parsed tree.
pub fn decode_tree<T>(tree: &Value) -> Result<T>
where
    T: Record + DeserializeOwned + 'static,
{
    let schema = SchemaRegistry::shared().schema_of::<T>();
    let decoded = check_record_positions(tree, &schema).and_then(|()| {
        serde_path_to_error::deserialize(tree).map_err(|err| classify(tree, err))
    });
    if let Err(err) = &decoded {
        debug!(
            record = schema.record,
            code = %err.code(),
            error = %err,
            "payload rejected during decode"
        );
    }
    decoded
}

/// serde reads a JSON array into a struct positionally. Records must be
/// objects, so arrays in record positions are rejected up front.
fn check_record_positions(tree: &Value, schema: &Schema) -> Result<()> {
    if tree.is_array() {
        return Err(DecodeError::InvalidStructure(format!(
            "expected object for {}, got array",
            schema.record
        )));
    }
    check_fields(tree, schema, "")
}

fn check_fields(node: &Value, schema: &Schema, prefix: &str) -> Result<()> {
    for spec in &schema.fields {
        if !spec.kind.nests() {
            continue;
        }
        let Some(child) = node.get(spec.name) else {
            continue;
        };
        // One lookup per field, shared by every element below it.
        let Some(nested) = spec.nested_in(SchemaRegistry::shared()) else {
            continue;
        };
        let path = format!("{prefix}{}", spec.name);
        match spec.kind {
            FieldKind::Record => check_record_value(child, &nested, &path)?,
            FieldKind::RecordSequence => {
                if let Some(items) = child.as_array() {
                    for (index, item) in items.iter().enumerate() {
                        check_record_value(item, &nested, &format!("{path}[{index}]"))?;
                    }
                }
            }
            FieldKind::Primitive | FieldKind::PrimitiveSequence => {}
        }
    }
    Ok(())
}

fn check_record_value(value: &Value, schema: &Schema, path: &str) -> Result<()> {
    match value {
        Value::Array(_) => Err(DecodeError::TypeMismatch {
            field: path.to_string(),
            expected: format!("struct {}", schema.record),
            actual: "array".to_string(),
        }),
        Value::Object(_) => check_fields(value, schema, &format!("{path}.")),
        _ => Ok(()),
    }
}

fn classify(tree: &Value, err: serde_path_to_error::Error<serde_json::Error>) -> DecodeError {
    let path = err.path().clone();
    let inner = err.into_inner();
    let message = inner.to_string();

    let Some((unexpected, expected)) = mismatch_parts(&message) else {
        return DecodeError::InvalidStructure(message);
    };
    // A mismatch at the root is a shape problem, not a field problem.
    if path.iter().next().is_none() {
        return DecodeError::InvalidStructure(message);
    }

    let actual = lookup(tree, &path)
        .map(|value| json_type_name(value).to_string())
        .unwrap_or(unexpected);

    DecodeError::TypeMismatch {
        field: format_path(&path),
        expected,
        actual,
    }
}

/// Split serde's `invalid type: X, expected Y` into `(X, Y)`.
fn mismatch_parts(message: &str) -> Option<(String, String)> {
    let rest = message
        .strip_prefix("invalid type: ")
        .or_else(|| message.strip_prefix("invalid value: "))?;
    let (unexpected, expected) = rest.rsplit_once(", expected ")?;
    Some((unexpected.to_string(), expected.to_string()))
}

fn lookup<'a>(tree: &'a Value, path: &Path) -> Option<&'a Value> {
    path.iter().try_fold(tree, |node, segment| match segment {
        Segment::Seq { index } => node.get(*index),
        Segment::Map { key } => node.get(key.as_str()),
        Segment::Enum { .. } | Segment::Unknown => None,
    })
}

/// Render a path the way the structural validator does: `a.b[2].c`.
fn format_path(path: &Path) -> String {
    let mut out = String::new();
    for segment in path.iter() {
        let name = match segment {
            Segment::Seq { index } => {
                out.push_str(&format!("[{index}]"));
                continue;
            }
            Segment::Map { key } => key.as_str(),
            Segment::Enum { variant } => variant.as_str(),
            Segment::Unknown => "?",
        };
        if !out.is_empty() {
            out.push('.');
        }
        out.push_str(name);
    }
    out
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

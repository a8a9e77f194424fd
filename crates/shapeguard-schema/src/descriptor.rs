use std::fmt;
use std::sync::Arc;

use crate::registry::SchemaRegistry;

/// Structural classification of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Scalars, optionals of scalars, mappings: no recursion.
    Primitive,
    /// A nested record, walked recursively.
    Record,
    /// A sequence whose elements are records, walked per element.
    RecordSequence,
    /// A sequence of non-record values; only its own emptiness matters.
    PrimitiveSequence,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Primitive => "primitive",
            FieldKind::Record => "record",
            FieldKind::RecordSequence => "record-sequence",
            FieldKind::PrimitiveSequence => "primitive-sequence",
        }
    }

    /// Whether the validator descends into values of this kind.
    pub fn nests(self) -> bool {
        matches!(self, FieldKind::Record | FieldKind::RecordSequence)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value that can sit in a record field.
///
/// Implementations for std types live in [`crate::empty`]; record types get
/// theirs from [`record!`](crate::record).
pub trait FieldValue {
    /// Kind of this type when used as a field.
    fn declared_kind() -> FieldKind
    where
        Self: Sized,
    {
        FieldKind::Primitive
    }

    /// Schema of the record this field nests, if any.
    fn nested_schema() -> Option<Schema>
    where
        Self: Sized,
    {
        None
    }

    /// Schema of the nested record, served from `registry`.
    fn registered_schema(_registry: &SchemaRegistry) -> Option<Arc<Schema>>
    where
        Self: Sized,
    {
        None
    }

    /// Whether the value counts as missing for a required field.
    fn is_empty_value(&self) -> bool;

    /// Present when the value is (or optionally holds) a record.
    fn as_record(&self) -> Option<&dyn Record> {
        None
    }

    /// Record elements of a sequence, keyed by their index in the sequence.
    fn element_records(&self) -> Vec<(usize, &dyn Record)> {
        Vec::new()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A structured value with a fixed, ordered set of named fields.
pub trait Record: FieldValue {
    fn record_name(&self) -> &'static str;

    /// Field descriptors in declaration order.
    fn fields(&self) -> Vec<FieldDescriptor<'_>>;

    /// The value-free shape of this record type.
    fn schema() -> Schema
    where
        Self: Sized;
}

/// One field of a concrete record value.
#[derive(Clone, Copy)]
pub struct FieldDescriptor<'a> {
    name: &'static str,
    required: bool,
    kind: FieldKind,
    value: &'a dyn FieldValue,
}

impl<'a> FieldDescriptor<'a> {
    pub fn new<T: FieldValue>(name: &'static str, required: bool, value: &'a T) -> Self {
        Self {
            name,
            required,
            kind: T::declared_kind(),
            value,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn value(&self) -> &'a dyn FieldValue {
        self.value
    }
}

impl fmt::Debug for FieldDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("required", &self.required)
            .field("kind", &self.kind)
            .field("type", &self.value.type_name())
            .finish()
    }
}

/// Depth at which [`Schema::paths`] stops descending.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Static description of one field, independent of any value.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
    pub type_name: &'static str,
    /// Resolved lazily so self-referential records do not recurse forever.
    pub nested: fn() -> Option<Schema>,
    pub registered: fn(&SchemaRegistry) -> Option<Arc<Schema>>,
}

impl FieldSpec {
    pub fn of<T: FieldValue>(name: &'static str, required: bool) -> Self {
        Self {
            name,
            required,
            kind: T::declared_kind(),
            type_name: std::any::type_name::<T>(),
            nested: T::nested_schema,
            registered: T::registered_schema,
        }
    }

    /// Nested schema through `registry`, so repeated lookups share one copy.
    pub fn nested_in(&self, registry: &SchemaRegistry) -> Option<Arc<Schema>> {
        (self.registered)(registry)
    }

    /// Type name with module paths stripped, e.g. `Vec<OrderItem>`.
    pub fn short_type_name(&self) -> String {
        short_type_name(self.type_name)
    }
}

/// Declared shape of a record type.
#[derive(Debug, Clone)]
pub struct Schema {
    pub record: &'static str,
    pub fields: Vec<FieldSpec>,
}

/// A flattened row of a schema, e.g. `order.items[].quantity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPath {
    pub path: String,
    pub type_name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl Schema {
    pub fn new(record: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self { record, fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|spec| spec.required)
    }

    /// Flatten the schema into one row per reachable field.
    ///
    /// Records nested deeper than `max_depth` are listed but not expanded.
    pub fn paths(&self, max_depth: usize) -> Vec<SchemaPath> {
        let mut rows = Vec::new();
        collect_paths(self, "", 0, max_depth, &mut rows);
        rows
    }
}

fn collect_paths(
    schema: &Schema,
    prefix: &str,
    depth: usize,
    max_depth: usize,
    rows: &mut Vec<SchemaPath>,
) {
    for spec in &schema.fields {
        let path = format!("{prefix}{}", spec.name);
        rows.push(SchemaPath {
            path: path.clone(),
            type_name: spec.short_type_name(),
            kind: spec.kind,
            required: spec.required,
        });

        if depth + 1 >= max_depth {
            continue;
        }
        let child_prefix = match spec.kind {
            FieldKind::Record => format!("{path}."),
            FieldKind::RecordSequence => format!("{path}[]."),
            FieldKind::Primitive | FieldKind::PrimitiveSequence => continue,
        };
        if let Some(nested) = (spec.nested)() {
            collect_paths(&nested, &child_prefix, depth + 1, max_depth, rows);
        }
    }
}

fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
            continue;
        }
        out.push_str(last_path_segment(&segment));
        segment.clear();
        out.push(ch);
    }
    out.push_str(last_path_segment(&segment));
    out
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

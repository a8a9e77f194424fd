//! Emptiness rules for required fields.
//!
//! A value is empty when it equals its kind's zero value: `""`, `false`,
//! `0`, `None`/`null`, or a collection with no elements. Records are never
//! empty. Note that a required `bool` holding `false` is therefore reported
//! as missing.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use crate::descriptor::{FieldKind, FieldValue, Record, Schema};
use crate::registry::SchemaRegistry;

/// Whether `value` counts as absent for a required field.
pub fn is_empty(value: &dyn FieldValue) -> bool {
    value.is_empty_value()
}

macro_rules! integer_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn is_empty_value(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

macro_rules! float_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn is_empty_value(&self) -> bool {
                    *self == 0.0
                }
            }
        )*
    };
}

integer_field!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
float_field!(f32, f64);

impl FieldValue for bool {
    fn is_empty_value(&self) -> bool {
        !*self
    }
}

impl FieldValue for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for &str {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for serde_json::Value {
    fn is_empty_value(&self) -> bool {
        self.is_null()
    }
}

impl FieldValue for serde_json::Map<String, serde_json::Value> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn declared_kind() -> FieldKind {
        T::declared_kind()
    }

    fn nested_schema() -> Option<Schema> {
        T::nested_schema()
    }

    fn registered_schema(registry: &SchemaRegistry) -> Option<Arc<Schema>> {
        T::registered_schema(registry)
    }

    fn is_empty_value(&self) -> bool {
        self.is_none()
    }

    fn as_record(&self) -> Option<&dyn Record> {
        self.as_ref().and_then(|inner| inner.as_record())
    }

    fn element_records(&self) -> Vec<(usize, &dyn Record)> {
        self.as_ref()
            .map(|inner| inner.element_records())
            .unwrap_or_default()
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    fn declared_kind() -> FieldKind {
        T::declared_kind()
    }

    fn nested_schema() -> Option<Schema> {
        T::nested_schema()
    }

    fn registered_schema(registry: &SchemaRegistry) -> Option<Arc<Schema>> {
        T::registered_schema(registry)
    }

    fn is_empty_value(&self) -> bool {
        self.as_ref().is_empty_value()
    }

    fn as_record(&self) -> Option<&dyn Record> {
        self.as_ref().as_record()
    }

    fn element_records(&self) -> Vec<(usize, &dyn Record)> {
        self.as_ref().element_records()
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn declared_kind() -> FieldKind {
        match T::declared_kind() {
            FieldKind::Record => FieldKind::RecordSequence,
            _ => FieldKind::PrimitiveSequence,
        }
    }

    fn nested_schema() -> Option<Schema> {
        match T::declared_kind() {
            FieldKind::Record => T::nested_schema(),
            _ => None,
        }
    }

    fn registered_schema(registry: &SchemaRegistry) -> Option<Arc<Schema>> {
        match T::declared_kind() {
            FieldKind::Record => T::registered_schema(registry),
            _ => None,
        }
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }

    fn element_records(&self) -> Vec<(usize, &dyn Record)> {
        self.iter()
            .enumerate()
            .filter_map(|(index, item)| item.as_record().map(|record| (index, record)))
            .collect()
    }
}

impl<T, S> FieldValue for HashSet<T, S> {
    fn declared_kind() -> FieldKind {
        FieldKind::PrimitiveSequence
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> FieldValue for BTreeSet<T> {
    fn declared_kind() -> FieldKind {
        FieldKind::PrimitiveSequence
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> FieldValue for HashMap<K, V, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> FieldValue for BTreeMap<K, V> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

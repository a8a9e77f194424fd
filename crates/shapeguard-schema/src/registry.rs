use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::debug;

use crate::descriptor::{Record, Schema};

/// Type-keyed cache of record schemas.
///
/// Population is read-through: two threads racing on the first lookup of a
/// type both derive the schema and one insert wins. Derivation is pure, so
/// either copy is correct.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<TypeId, Arc<Schema>>>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry.
    pub fn shared() -> &'static SchemaRegistry {
        static SHARED: OnceLock<SchemaRegistry> = OnceLock::new();
        SHARED.get_or_init(SchemaRegistry::new)
    }

    /// Schema of `R`, derived on first use.
    pub fn schema_of<R: Record + 'static>(&self) -> Arc<Schema> {
        let key = TypeId::of::<R>();
        if let Some(schema) = self
            .schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(schema);
        }

        let derived = Arc::new(R::schema());
        debug!(
            record = derived.record,
            fields = derived.fields.len(),
            "derived record schema"
        );
        let mut schemas = self.schemas.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(schemas.entry(key).or_insert(derived))
    }

    /// Check if a schema for `R` has been derived.
    pub fn contains<R: 'static>(&self) -> bool {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<R>())
    }

    pub fn len(&self) -> usize {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of cached record types, sorted.
    pub fn record_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|schema| schema.record)
            .collect();
        names.sort_unstable();
        names
    }
}

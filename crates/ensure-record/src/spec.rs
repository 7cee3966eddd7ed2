//! # Record Specifications
//!
//! A [`RecordSpec`] maps field names to descriptors. It is built either in
//! code with [`RecordSpec::field`] or from a dynamic schema object whose
//! values are descriptor names (`{"name": "string", "age": "?number"}`).

use std::collections::BTreeMap;

use ensure_core::{ensure, Descriptor, EnsureResult, Value};

/// Field name → descriptor mapping for a record type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSpec {
    fields: BTreeMap<String, Descriptor>,
}

impl RecordSpec {
    /// An empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a field.
    pub fn field(mut self, name: impl Into<String>, descriptor: impl Into<Descriptor>) -> Self {
        self.fields.insert(name.into(), descriptor.into());
        self
    }

    /// Parse a schema object.
    ///
    /// # Errors
    ///
    /// A schema that is not an object, or a field whose value is not a
    /// string, is a type failure. An unknown descriptor name is a
    /// precondition failure.
    pub fn from_value(schema: &Value) -> EnsureResult<Self> {
        ensure(schema, &Descriptor::OBJECT)?;

        let entries = match schema {
            Value::Object(map) => map,
            Value::Instance(instance) => instance.fields(),
            _ => return Ok(Self::new()),
        };

        let mut fields = BTreeMap::new();
        for (name, descriptor) in entries {
            fields.insert(name.clone(), Descriptor::from_value(descriptor)?);
        }
        Ok(Self { fields })
    }

    /// Parse a schema from JSON.
    pub fn from_json(schema: &serde_json::Value) -> EnsureResult<Self> {
        Self::from_value(&Value::from(schema.clone()))
    }

    /// Descriptor for `name`.
    pub fn get(&self, name: &str) -> Option<&Descriptor> {
        self.fields.get(name)
    }

    /// Fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Descriptor)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Descriptor)> for RecordSpec {
    fn from_iter<I: IntoIterator<Item = (K, Descriptor)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, d)| (k.into(), d)).collect(),
        }
    }
}

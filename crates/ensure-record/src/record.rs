//! # Record Types and Instances
//!
//! [`RecordType`] is the "constructor" derived from a [`RecordSpec`]; every
//! [`Record`] it builds carries exactly the spec's fields.
//!
//! ## Invariants
//!
//! - The field set is fixed when the type is built. Writing to an unknown
//!   field is an error; there is no way to add or remove fields.
//! - Every write goes through the check engine (strict). A rejected write
//!   leaves the previous value in place.
//! - A field named `prototype` is never installed.
//! - Construction copies only declared fields out of the initial values;
//!   anything else in the values object is ignored.
//!
//! Each record type owns a [`Class`] extending [`record_base_class`], so a
//! record converted with [`Record::to_value`] matches both
//! `Descriptor::class(record_type.class())` and the shared base class.

use std::sync::{Arc, OnceLock};

use ensure_core::{
    ensure, Class, Descriptor, EnsureError, EnsureResult, Instance, Map, TypeFailure, Value,
};
use serde::{Serialize, Serializer};

use crate::spec::RecordSpec;

const RESERVED_FIELD: &str = "prototype";

/// The class every record type extends.
pub fn record_base_class() -> &'static Arc<Class> {
    static BASE: OnceLock<Arc<Class>> = OnceLock::new();
    BASE.get_or_init(|| Class::new("Record"))
}

#[derive(Debug)]
struct RecordTypeInner {
    class: Arc<Class>,
    spec: RecordSpec,
}

/// A record constructor. Cheap to clone; clones are the same type.
#[derive(Debug, Clone)]
pub struct RecordType {
    inner: Arc<RecordTypeInner>,
}

impl RecordType {
    /// Derive a record type from `spec`.
    pub fn new(name: impl Into<String>, spec: RecordSpec) -> Self {
        let name = name.into();
        let spec: RecordSpec = spec
            .iter()
            .filter(|(field, _)| *field != RESERVED_FIELD)
            .map(|(field, descriptor)| (field, descriptor.clone()))
            .collect();
        tracing::debug!(record = %name, fields = spec.len(), "record type built");

        Self {
            inner: Arc::new(RecordTypeInner {
                class: Class::extend(record_base_class(), name),
                spec,
            }),
        }
    }

    /// Derive a record type from a dynamic schema object.
    ///
    /// # Errors
    ///
    /// See [`RecordSpec::from_value`].
    pub fn from_schema(name: impl Into<String>, schema: &Value) -> EnsureResult<Self> {
        Ok(Self::new(name, RecordSpec::from_value(schema)?))
    }

    /// Type name.
    pub fn name(&self) -> &str {
        self.inner.class.name()
    }

    /// The installed fields.
    pub fn spec(&self) -> &RecordSpec {
        &self.inner.spec
    }

    /// The class instances of this type belong to.
    pub fn class(&self) -> &Arc<Class> {
        &self.inner.class
    }

    /// Descriptor matching records of this type (as values).
    pub fn descriptor(&self) -> Descriptor {
        Descriptor::class(&self.inner.class)
    }

    /// Build a record from an initial values object.
    ///
    /// # Errors
    ///
    /// A type failure if `values` is not an object, or if a declared field
    /// carries a value of the wrong type.
    pub fn construct(&self, values: &Value) -> EnsureResult<Record> {
        ensure(values, &Descriptor::OBJECT)?;

        let mut record = Record {
            record_type: self.clone(),
            values: self
                .spec()
                .iter()
                .map(|(field, _)| (field.to_string(), Value::Undefined))
                .collect(),
        };

        for (field, _) in self.spec().iter() {
            if let Some(value) = values.get_property(field) {
                record.set(field, value.clone())?;
            }
        }
        Ok(record)
    }

    /// Build a record from a JSON object.
    pub fn construct_json(&self, values: &serde_json::Value) -> EnsureResult<Record> {
        self.construct(&Value::from(values.clone()))
    }

    /// True when both handles are the same record type.
    pub fn same_type(&self, other: &RecordType) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Derive a record type from `spec`.
pub fn build_record_type(name: impl Into<String>, spec: RecordSpec) -> RecordType {
    RecordType::new(name, spec)
}

/// A sealed, field-checked value object.
#[derive(Debug, Clone)]
pub struct Record {
    record_type: RecordType,
    values: Map,
}

impl Record {
    /// The type that built this record.
    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    /// Current value of `field`; `None` if the type has no such field.
    ///
    /// Declared fields that were never written read as `Value::Undefined`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Write `field`, checking it against the field's descriptor first.
    ///
    /// # Errors
    ///
    /// A precondition failure for an undeclared field, a type failure for a
    /// mismatched value (its message is prefixed with `Type.field`). Either
    /// way the record is unchanged.
    pub fn set(&mut self, field: &str, value: Value) -> EnsureResult<()> {
        let descriptor = self.record_type.spec().get(field).ok_or_else(|| {
            EnsureError::precondition(format!(
                "record {} has no field {field:?}",
                self.record_type.name()
            ))
        })?;
        ensure(&value, descriptor).map_err(|failure| {
            TypeFailure::with_message(
                failure.expected().clone(),
                failure.provided().map(str::to_string),
                format!("{}.{field}: {}", self.record_type.name(), failure.message()),
            )
        })?;

        if let Some(slot) = self.values.get_mut(field) {
            *slot = value;
        }
        Ok(())
    }

    /// Field names and values, in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// True if this record was built by `record_type`.
    pub fn is_instance_of(&self, record_type: &RecordType) -> bool {
        self.record_type.same_type(record_type)
    }

    /// Snapshot as a class instance.
    pub fn to_value(&self) -> Value {
        Value::Instance(Instance::with_fields(
            Arc::clone(self.record_type.class()),
            self.values.clone(),
        ))
    }

    /// Snapshot as JSON; unset fields are omitted.
    pub fn to_json(&self) -> serde_json::Value {
        self.to_value()
            .to_json()
            .unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

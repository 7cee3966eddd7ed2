//! # Nullable Holder
//!
//! A slot that holds either the null marker or a value conforming to a
//! fixed descriptor. Writes go through the check engine (strict), so the
//! slot never holds anything else while enforcement is on.

use crate::check::ensure;
use crate::descriptor::Descriptor;
use crate::error::TypeFailure;
use crate::value::Value;

/// Null or a value of `descriptor`.
#[derive(Debug, Clone, PartialEq)]
pub struct NullableValue {
    descriptor: Descriptor,
    value: Value,
}

impl NullableValue {
    /// Create a holder, starting out null unless `initial` is given.
    ///
    /// # Errors
    ///
    /// Returns a [`TypeFailure`] if `initial` does not conform.
    pub fn new(descriptor: Descriptor, initial: Option<Value>) -> Result<Self, TypeFailure> {
        let mut holder = Self {
            descriptor,
            value: Value::Null,
        };
        if let Some(value) = initial {
            holder.set_value(value)?;
        }
        Ok(holder)
    }

    /// Replace the held value. On failure the previous value is kept.
    pub fn set_value(&mut self, value: Value) -> Result<(), TypeFailure> {
        if !value.is_null() {
            ensure(&value, &self.descriptor)?;
        }
        self.value = value;
        Ok(())
    }

    /// The held value (`Value::Null` when empty).
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// True while the holder is null.
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// The descriptor values must conform to when not null.
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// The matching `Nullable` descriptor.
    pub fn as_descriptor(&self) -> Descriptor {
        Descriptor::nullable(self.descriptor.clone())
    }

    /// Take the held value, leaving null behind.
    pub fn take(&mut self) -> Value {
        std::mem::replace(&mut self.value, Value::Null)
    }
}

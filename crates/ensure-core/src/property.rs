//! # Property and Presence Helpers
//!
//! Checks built on the engine for the common "does this object carry a
//! usable field" and "is this value defined at all" questions.
//!
//! `has_property` defaults to soft behaviour (callers branch on the
//! boolean); the typed shortcuts `has_string`, `has_number`, `has_function`
//! and `has_object` are strict and return an error instead.

use crate::check::{check, Strictness};
use crate::descriptor::Descriptor;
use crate::error::{EnsureError, EnsureResult};
use crate::predicates::is_empty;
use crate::value::{Class, Value};

static NULL: Value = Value::Null;

/// Does `object` have a defined property `name`, optionally of type
/// `descriptor`?
///
/// With `soft == true` every negative outcome is `Ok(false)`. With
/// `soft == false` a missing property is a precondition error and a
/// mistyped one is a type failure; the type check then runs even while
/// enforcement is off.
pub fn has_property(
    object: &Value,
    name: &str,
    descriptor: Option<&Descriptor>,
    soft: bool,
) -> EnsureResult<bool> {
    let strictness = if soft {
        Strictness::Soft
    } else {
        Strictness::Forced
    };
    has_property_with(object, name, descriptor, strictness)
}

fn has_property_with(
    object: &Value,
    name: &str,
    descriptor: Option<&Descriptor>,
    strictness: Strictness,
) -> EnsureResult<bool> {
    let soft = strictness.is_soft();

    if object.is_undefined() {
        if soft {
            return Ok(false);
        }
        return Err(EnsureError::precondition(format!(
            "expected object to have property {name:?} but the object is undefined"
        )));
    }

    let property = match object.get_property(name) {
        Some(value) if !value.is_undefined() => value,
        _ => {
            if soft {
                return Ok(false);
            }
            return Err(EnsureError::precondition(format!(
                "expected object to have property {name:?} but it is undefined"
            )));
        }
    };

    match descriptor {
        Some(descriptor) => Ok(check(property, descriptor, strictness)?),
        None => Ok(true),
    }
}

/// Strict: `object.name` must be a function.
pub fn has_function(object: &Value, name: &str) -> EnsureResult<()> {
    has_property_with(object, name, Some(&Descriptor::FUNCTION), Strictness::Strict).map(|_| ())
}

/// Strict: `object.name` must be a string.
pub fn has_string(object: &Value, name: &str) -> EnsureResult<()> {
    has_property_with(object, name, Some(&Descriptor::STRING), Strictness::Strict).map(|_| ())
}

/// Strict: `object.name` must be a number.
pub fn has_number(object: &Value, name: &str) -> EnsureResult<()> {
    has_property_with(object, name, Some(&Descriptor::NUMBER), Strictness::Strict).map(|_| ())
}

/// Strict: `object.name` must be an object.
pub fn has_object(object: &Value, name: &str) -> EnsureResult<()> {
    has_property_with(object, name, Some(&Descriptor::OBJECT), Strictness::Strict).map(|_| ())
}

/// Fail unless `value` is defined: not undefined, not null, not `""`.
pub fn require_defined(value: &Value) -> EnsureResult<()> {
    if is_empty(value) {
        return Err(EnsureError::precondition(
            "expected a defined variable, got null, undefined, or empty string",
        ));
    }
    Ok(())
}

/// Is `context` a genuine instance of `class`?
///
/// `Undefined`, the context a function receives when nothing was bound,
/// never counts.
pub fn is_constructed_with_new(class: &Class, context: &Value) -> bool {
    context
        .as_instance()
        .is_some_and(|instance| instance.is_instance_of(class))
}

/// Fail unless `context` is an instance of `class`.
pub fn require_constructed_with_new(class: &Class, context: &Value) -> EnsureResult<()> {
    if !is_constructed_with_new(class, context) {
        return Err(EnsureError::precondition(format!(
            "expected to be called on an instance of {}, got {}",
            class.name(),
            context.type_name()
        )));
    }
    Ok(())
}

/// The first candidate that is neither undefined nor null, else null.
pub fn first_defined(candidates: &[Value]) -> &Value {
    candidates
        .iter()
        .find(|c| !c.is_undefined() && !c.is_null())
        .unwrap_or(&NULL)
}

//! # Primitive Predicates
//!
//! Pure, total membership tests over [`Value`]. Each positive predicate has
//! an `is_not_*` counterpart.
//!
//! `is_number` rejects booleans outright even though they are numeric under
//! naive coercion. It also performs no string coercion: `"42"` is a string,
//! not a number.

use crate::check::{check, Strictness};
use crate::descriptor::Descriptor;
use crate::error::TypeFailure;
use crate::value::Value;

/// True for the absence marker, the null marker and the empty string.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

pub fn is_not_empty(value: &Value) -> bool {
    !is_empty(value)
}

/// True for boolean primitives only; no truthiness.
pub fn is_boolean(value: &Value) -> bool {
    matches!(value, Value::Bool(_))
}

pub fn is_not_boolean(value: &Value) -> bool {
    !is_boolean(value)
}

/// True for primitive or boxed numbers that are not NaN.
pub fn is_number(value: &Value) -> bool {
    match value {
        Value::Number(n) | Value::BoxedNumber(n) => !n.is_nan(),
        _ => false,
    }
}

pub fn is_not_number(value: &Value) -> bool {
    !is_number(value)
}

/// True for primitive and boxed strings.
pub fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::BoxedString(_))
}

pub fn is_not_string(value: &Value) -> bool {
    !is_string(value)
}

/// Inclusive range test. A missing bound leaves that side open.
///
/// Values without a numeric form are never in range.
pub fn is_in_range(value: &Value, min: Option<f64>, max: Option<f64>) -> bool {
    let Some(n) = value.as_number() else {
        return false;
    };
    if n.is_nan() {
        return false;
    }
    if min.is_some_and(|min| n < min) {
        return false;
    }
    if max.is_some_and(|max| n > max) {
        return false;
    }
    true
}

pub fn is_not_in_range(value: &Value, min: Option<f64>, max: Option<f64>) -> bool {
    !is_in_range(value, min, max)
}

/// A number that is zero or greater.
pub fn is_positive_number(value: &Value) -> bool {
    is_number(value) && is_in_range(value, Some(0.0), None)
}

pub fn is_not_positive_number(value: &Value) -> bool {
    !is_positive_number(value)
}

/// Membership of `needle` in the array `haystack`.
///
/// The haystack is checked strictly against `Array` first.
///
/// # Errors
///
/// Returns a [`TypeFailure`] when `haystack` is not an array and
/// enforcement is on.
pub fn is_in(needle: &Value, haystack: &Value) -> Result<bool, TypeFailure> {
    check(haystack, &Descriptor::ARRAY, Strictness::Strict)?;
    Ok(haystack
        .as_array()
        .is_some_and(|items| items.contains(needle)))
}

/// Negation of [`is_in`]; the haystack check is the same.
pub fn is_not_in(needle: &Value, haystack: &Value) -> Result<bool, TypeFailure> {
    is_in(needle, haystack).map(|found| !found)
}

/// True for ordered sequences.
pub fn is_array(value: &Value) -> bool {
    matches!(value, Value::Array(_))
}

pub fn is_not_array(value: &Value) -> bool {
    !is_array(value)
}

/// True for own-key containers: plain objects and class instances.
///
/// Arrays, functions and boxed primitives are not objects here.
pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Instance(_))
}

pub fn is_not_object(value: &Value) -> bool {
    !is_object(value)
}

/// True for callables.
pub fn is_function(value: &Value) -> bool {
    matches!(value, Value::Function(_))
}

pub fn is_not_function(value: &Value) -> bool {
    !is_function(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Class, Function, Instance};
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn empty_values() {
        assert!(is_empty(&Value::Undefined));
        assert!(is_empty(&Value::Null));
        assert!(is_empty(&v(json!(""))));
        assert!(is_not_empty(&v(json!("hi"))));
        assert!(is_not_empty(&v(json!(false))));
        assert!(is_not_empty(&v(json!(0))));
        assert!(is_not_empty(&v(json!({}))));
        assert!(is_not_empty(&Value::BoxedString(String::new())));
    }

    #[test]
    fn booleans_are_strict() {
        assert!(is_boolean(&v(json!(true))));
        assert!(is_boolean(&Value::Bool(45 > 0)));
        assert!(is_not_boolean(&v(json!(1))));
        assert!(is_not_boolean(&v(json!(0))));
        assert!(is_not_boolean(&v(json!("true"))));
    }

    #[test]
    fn numbers_exclude_booleans_and_nan() {
        assert!(is_number(&v(json!(45))));
        assert!(is_number(&v(json!(-45.45))));
        assert!(is_number(&Value::BoxedNumber(45.0)));
        assert!(is_number(&Value::Number(f64::INFINITY)));
        assert!(is_not_number(&v(json!(true))));
        assert!(is_not_number(&v(json!(false))));
        assert!(is_not_number(&Value::Number(f64::NAN)));
        assert!(is_not_number(&v(json!("true"))));
        assert!(is_not_number(&v(json!("42"))));
        assert!(is_not_number(&v(json!({}))));
    }

    #[test]
    fn strings_include_boxed() {
        assert!(is_string(&v(json!("hi"))));
        assert!(is_string(&Value::BoxedString("hi".into())));
        assert!(is_not_string(&v(json!(45))));
        assert!(is_not_string(&v(json!(["hi", 90]))));
    }

    #[test]
    fn in_range() {
        assert!(is_in_range(&v(json!(2)), Some(-5.0), Some(4.0)));
        assert!(!is_in_range(&v(json!(-20)), Some(-5.0), Some(4.0)));
        assert!(!is_in_range(&v(json!(20)), Some(-5.0), Some(4.0)));
        assert!(!is_in_range(&v(json!(20)), None, Some(3.0)));
        assert!(is_in_range(&v(json!(2)), None, Some(3.0)));
        assert!(is_in_range(&v(json!(4)), Some(-5.0), Some(4.0)));
        assert!(is_in_range(&v(json!(-1e300)), None, None));
        assert!(!is_in_range(&v(json!([1, 3])), None, None));

        assert!(!is_not_in_range(&v(json!(2)), Some(-5.0), Some(4.0)));
        assert!(is_not_in_range(&v(json!(-20)), Some(-5.0), Some(4.0)));
    }

    #[test]
    fn positive_numbers() {
        assert!(is_positive_number(&v(json!(2))));
        assert!(is_positive_number(&v(json!(0))));
        assert!(!is_positive_number(&v(json!(-20))));
        assert!(!is_positive_number(&v(json!([1, 3]))));
        assert!(is_not_positive_number(&v(json!([1, 4]))));
        assert!(!is_not_positive_number(&v(json!(2))));
    }

    #[test]
    fn membership() {
        let haystack = v(json!([1, 2, 3, 4, 5]));
        assert!(is_in(&v(json!(4)), &haystack).unwrap());
        assert!(!is_in(&v(json!(6)), &haystack).unwrap());
        assert!(is_not_in(&v(json!(6)), &haystack).unwrap());
        assert!(is_in(&v(json!("b")), &v(json!(["a", "b"]))).unwrap());
    }

    #[test]
    fn objects_are_key_containers() {
        let point = Class::new("Point");
        assert!(is_object(&v(json!({}))));
        assert!(is_object(&Value::Instance(Instance::new(point))));
        assert!(is_not_object(&v(json!([]))));
        assert!(is_not_object(&Value::Null));
        assert!(is_not_object(&Value::Undefined));
        assert!(is_not_object(&Value::BoxedString("s".into())));
        assert!(is_not_object(&Value::Function(Function::new("f", |_, _| {
            Ok(Value::Undefined)
        }))));
    }

    #[test]
    fn arrays_and_functions() {
        assert!(is_array(&v(json!([]))));
        assert!(is_not_array(&v(json!({}))));
        let f = Function::new("f", |_, _| Ok(Value::Null));
        assert!(is_function(&Value::Function(f)));
        assert!(is_not_function(&v(json!("f"))));
    }
}

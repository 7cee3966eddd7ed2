//! # Dynamic Value Model
//!
//! The values the check engine inspects. `Value` models an untyped runtime
//! value: the two "empty" markers (`Undefined` for an unbound slot, `Null`
//! for an explicit "no object"), primitives, boxed primitives, ordered
//! sequences, key containers, callables and class instances.
//!
//! ## Equality
//!
//! Data values compare structurally. Functions compare by identity (two
//! clones of the same `Function` are equal, two separately built closures
//! never are). Instances compare by class identity and then by fields.
//! `Number(NaN)` is never equal to anything, itself included.
//!
//! ## JSON Interop
//!
//! `From<serde_json::Value>` maps JSON onto the model one-to-one.
//! [`Value::to_json`] goes the other way, following the usual JSON
//! stringification rules: `Undefined` and functions disappear from objects
//! and become `null` inside arrays; non-finite numbers become `null`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::EnsureError;

/// Ordered key container used by `Value::Object` and instance fields.
pub type Map = BTreeMap<String, Value>;

type Callable = dyn Fn(&Value, &[Value]) -> Result<Value, EnsureError> + Send + Sync;

/// A runtime value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// The absence marker: a binding that holds no value at all.
    #[default]
    Undefined,
    /// The null marker: an explicit "no object".
    Null,
    /// Boolean primitive.
    Bool(bool),
    /// Number primitive.
    Number(f64),
    /// String primitive.
    String(String),
    /// String wrapped in an object.
    BoxedString(String),
    /// Number wrapped in an object.
    BoxedNumber(f64),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Plain key container.
    Object(Map),
    /// Callable.
    Function(Function),
    /// Object created from a [`Class`].
    Instance(Instance),
}

impl Value {
    /// Build a `Value::Object` from `(key, value)` pairs.
    pub fn object<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a `Value::Array` from anything convertible into values.
    pub fn array<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// True for the absence marker.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// True for the null marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// String contents of a primitive or boxed string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::BoxedString(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric contents of a primitive or boxed number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) | Value::BoxedNumber(n) => Some(*n),
            _ => None,
        }
    }

    /// Elements of an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Entries of a plain object.
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// The callable, if this value is a function.
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// The instance, if this value was created from a class.
    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(i) => Some(i),
            _ => None,
        }
    }

    /// Look up an own property of an object or instance.
    ///
    /// Every other kind of value has no properties.
    pub fn get_property(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(name),
            Value::Instance(instance) => instance.get(name),
            _ => None,
        }
    }

    /// Human-readable name of the observed type, used in failure messages.
    pub fn type_name(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(_) => "boolean".to_string(),
            Value::Number(_) => "number".to_string(),
            Value::String(_) => "string".to_string(),
            Value::BoxedString(_) => "String object".to_string(),
            Value::BoxedNumber(_) => "Number object".to_string(),
            Value::Array(_) => "array".to_string(),
            Value::Object(_) => "object".to_string(),
            Value::Function(f) => format!("function {}", f.name()),
            Value::Instance(i) => i.class().name().to_string(),
        }
    }

    /// Convert to JSON.
    ///
    /// Returns `None` when the value itself has no JSON form (`Undefined`
    /// or a function).
    pub fn to_json(&self) -> Option<serde_json::Value> {
        use serde_json::Value as Json;

        match self {
            Value::Undefined | Value::Function(_) => None,
            Value::Null => Some(Json::Null),
            Value::Bool(b) => Some(Json::Bool(*b)),
            Value::Number(n) | Value::BoxedNumber(n) => Some(number_to_json(*n)),
            Value::String(s) | Value::BoxedString(s) => Some(Json::String(s.clone())),
            Value::Array(items) => Some(Json::Array(
                items
                    .iter()
                    .map(|item| item.to_json().unwrap_or(Json::Null))
                    .collect(),
            )),
            Value::Object(map) => Some(map_to_json(map)),
            Value::Instance(instance) => Some(map_to_json(instance.fields())),
        }
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    // Integral values print without a trailing ".0".
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return serde_json::Value::from(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

fn map_to_json(map: &Map) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .filter_map(|(k, v)| v.to_json().map(|json| (k.clone(), json)))
            .collect(),
    )
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Function(func) => write!(f, "[function {}]", func.name()),
            Value::Instance(instance) => {
                write!(f, "{} {}", instance.class().name(), map_to_json(instance.fields()))
            }
            other => match other.to_json() {
                Some(json) => write!(f, "{json}"),
                None => f.write_str("undefined"),
            },
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<Instance> for Value {
    fn from(i: Instance) -> Self {
        Value::Instance(i)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

// ─── Functions ──────────────────────────────────────────────────────

/// A named callable value.
///
/// The callable receives the `this` context it was invoked with and the
/// positional arguments. Cloning shares the underlying closure, so clones
/// compare equal.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    inner: Arc<Callable>,
}

impl Function {
    /// Wrap a closure as a function value.
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, EnsureError> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            inner: Arc::new(f),
        }
    }

    /// The function's name (may be empty for anonymous functions).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke with an explicit `this` context.
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value, EnsureError> {
        (self.inner)(this, args)
    }

    /// True when both handles share the same closure.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::as_ptr(&self.inner) as *const () == Arc::as_ptr(&other.inner) as *const ()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function").field("name", &self.name).finish_non_exhaustive()
    }
}

// ─── Classes and instances ──────────────────────────────────────────

/// A user-defined class.
///
/// Classes form single-parent chains. Identity is by allocation: two
/// classes with the same name are still distinct types.
#[derive(Debug)]
pub struct Class {
    name: String,
    parent: Option<Arc<Class>>,
}

impl Class {
    /// Define a root class.
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parent: None,
        })
    }

    /// Define a class that extends `parent`.
    pub fn extend(parent: &Arc<Class>, name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parent: Some(Arc::clone(parent)),
        })
    }

    /// The class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The direct superclass, if any.
    pub fn parent(&self) -> Option<&Arc<Class>> {
        self.parent.as_ref()
    }

    /// True if `self` is `ancestor` or inherits from it.
    pub fn is_subclass_of(&self, ancestor: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if std::ptr::eq(class, ancestor) {
                return true;
            }
            current = class.parent.as_deref();
        }
        false
    }
}

/// An object created from a [`Class`].
#[derive(Debug, Clone)]
pub struct Instance {
    class: Arc<Class>,
    fields: Map,
}

impl Instance {
    /// Create an instance with no fields.
    pub fn new(class: Arc<Class>) -> Self {
        Self {
            class,
            fields: Map::new(),
        }
    }

    /// Create an instance with the given fields.
    pub fn with_fields(class: Arc<Class>, fields: Map) -> Self {
        Self { class, fields }
    }

    /// The class this instance was created from.
    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    /// The instance's own fields.
    pub fn fields(&self) -> &Map {
        &self.fields
    }

    /// Look up a field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Instance-of test, honouring inheritance.
    pub fn is_instance_of(&self, class: &Class) -> bool {
        self.class.is_subclass_of(class)
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.class, &other.class) && self.fields == other.fields
    }
}

//! # Type Descriptors
//!
//! A [`Descriptor`] is "what a value should be", expressed as data. The set
//! of kinds is closed:
//!
//! - `Primitive(kind)` — one of the six built-in kinds, each backed by a
//!   single predicate from [`crate::predicates`].
//! - `Absent` — only the absence marker (`Value::Undefined`) conforms.
//! - `Nullable(inner)` — the null marker, or anything `inner` accepts.
//! - `Custom(CustomType)` — a named, caller-supplied membership test.
//!   [`CustomType::class`] builds the usual instance-of test for a
//!   [`Class`].
//!
//! A descriptor's kind is fixed when it is built; there is no way to mutate
//! one in place.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{EnsureError, TypeFailure};
use crate::predicates;
use crate::value::{Class, Value};

/// Built-in primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    /// Primitive or boxed strings.
    String,
    /// Boolean primitives.
    Boolean,
    /// Non-NaN primitive or boxed numbers; never booleans.
    Number,
    /// Ordered sequences.
    Array,
    /// Own-key containers (plain objects and class instances).
    Object,
    /// Callables.
    Function,
}

impl Primitive {
    /// All primitive kinds.
    pub const ALL: [Primitive; 6] = [
        Primitive::String,
        Primitive::Boolean,
        Primitive::Number,
        Primitive::Array,
        Primitive::Object,
        Primitive::Function,
    ];

    /// Display name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Number => "Number",
            Self::Array => "Array",
            Self::Object => "Object",
            Self::Function => "Function",
        }
    }

    /// Run the kind's membership predicate.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => predicates::is_string(value),
            Self::Boolean => predicates::is_boolean(value),
            Self::Number => predicates::is_number(value),
            Self::Array => predicates::is_array(value),
            Self::Object => predicates::is_object(value),
            Self::Function => predicates::is_function(value),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Matcher = dyn Fn(&Value) -> bool + Send + Sync;

/// Deepest `?T` / `nullable<T>` nesting [`Descriptor::parse`] accepts.
pub const MAX_NULLABLE_DEPTH: usize = 16;

const NULLABLE_PREFIX: &str = "nullable<";

fn is_nullable_wrapper(text: &str) -> bool {
    text.ends_with('>')
        && text.len() > NULLABLE_PREFIX.len()
        && text
            .get(..NULLABLE_PREFIX.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(NULLABLE_PREFIX))
}

/// A named, caller-defined type.
///
/// Two custom types are equal when they share the same matcher, or when
/// both were built by [`CustomType::class`] for the same class.
#[derive(Clone)]
pub struct CustomType {
    name: Arc<str>,
    matcher: Arc<Matcher>,
    class: Option<Arc<Class>>,
}

impl CustomType {
    /// A custom type backed by an arbitrary membership test.
    pub fn new<F>(name: impl Into<String>, matcher: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            matcher: Arc::new(matcher),
            class: None,
        }
    }

    /// Instance-of test against `class` (subclasses included).
    pub fn class(class: &Arc<Class>) -> Self {
        let target = Arc::clone(class);
        let mut custom = Self::new(class.name(), move |value| {
            value
                .as_instance()
                .is_some_and(|instance| instance.is_instance_of(&target))
        });
        custom.class = Some(Arc::clone(class));
        custom
    }

    /// The type's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The class behind an instance-of type.
    pub fn backing_class(&self) -> Option<&Arc<Class>> {
        self.class.as_ref()
    }

    /// Run the membership test.
    pub fn matches(&self, value: &Value) -> bool {
        (self.matcher)(value)
    }
}

impl PartialEq for CustomType {
    fn eq(&self, other: &Self) -> bool {
        match (&self.class, &other.class) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => {
                Arc::as_ptr(&self.matcher) as *const () == Arc::as_ptr(&other.matcher) as *const ()
            }
            _ => false,
        }
    }
}

impl fmt::Debug for CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomType").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Expected type of a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    /// A built-in primitive kind.
    Primitive(Primitive),
    /// Only the absence marker.
    Absent,
    /// The null marker or the inner descriptor.
    Nullable(Box<Descriptor>),
    /// A caller-defined type.
    Custom(CustomType),
}

impl Descriptor {
    pub const STRING: Descriptor = Descriptor::Primitive(Primitive::String);
    pub const BOOLEAN: Descriptor = Descriptor::Primitive(Primitive::Boolean);
    pub const NUMBER: Descriptor = Descriptor::Primitive(Primitive::Number);
    pub const ARRAY: Descriptor = Descriptor::Primitive(Primitive::Array);
    pub const OBJECT: Descriptor = Descriptor::Primitive(Primitive::Object);
    pub const FUNCTION: Descriptor = Descriptor::Primitive(Primitive::Function);
    /// Alias for [`Descriptor::Absent`].
    pub const NOTHING: Descriptor = Descriptor::Absent;

    /// Wrap `inner` so that the null marker is also accepted.
    pub fn nullable(inner: impl Into<Descriptor>) -> Self {
        Self::Nullable(Box::new(inner.into()))
    }

    /// Instance-of descriptor for `class`.
    pub fn class(class: &Arc<Class>) -> Self {
        Self::Custom(CustomType::class(class))
    }

    /// Descriptor backed by a caller-supplied membership test.
    pub fn custom<F>(name: impl Into<String>, matcher: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::Custom(CustomType::new(name, matcher))
    }

    /// True for `Nullable(_)`.
    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    /// True for `Absent`.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The wrapped descriptor of a `Nullable`.
    pub fn inner(&self) -> Option<&Descriptor> {
        match self {
            Self::Nullable(inner) => Some(inner),
            _ => None,
        }
    }

    /// Parse a descriptor name.
    ///
    /// Accepts `string`, `boolean`, `number`, `array`, `object`, `function`,
    /// `nothing`, `nullable<T>` and the shorthand `?T`, case-insensitively.
    /// At most [`MAX_NULLABLE_DEPTH`] nullable layers are accepted. Custom
    /// types have no textual form.
    pub fn parse(text: &str) -> Result<Self, EnsureError> {
        let mut rest = text.trim();
        let mut depth = 0;

        loop {
            if let Some(inner) = rest.strip_prefix('?') {
                rest = inner.trim();
            } else if is_nullable_wrapper(rest) {
                rest = rest[NULLABLE_PREFIX.len()..rest.len() - 1].trim();
            } else {
                break;
            }
            depth += 1;
            if depth > MAX_NULLABLE_DEPTH {
                return Err(EnsureError::precondition(format!(
                    "type descriptor nests more than {MAX_NULLABLE_DEPTH} nullable layers"
                )));
            }
        }

        let mut descriptor = match rest.to_ascii_lowercase().as_str() {
            "string" => Self::STRING,
            "boolean" | "bool" => Self::BOOLEAN,
            "number" => Self::NUMBER,
            "array" => Self::ARRAY,
            "object" => Self::OBJECT,
            "function" => Self::FUNCTION,
            "nothing" | "undefined" => Self::Absent,
            _ => {
                return Err(EnsureError::precondition(format!(
                    "unknown type descriptor: {rest:?}"
                )))
            }
        };
        for _ in 0..depth {
            descriptor = Self::nullable(descriptor);
        }
        Ok(descriptor)
    }

    /// Parse a descriptor held in a dynamic string value.
    ///
    /// Anything other than a string is a [`TypeFailure`].
    pub fn from_value(value: &Value) -> Result<Self, EnsureError> {
        match value.as_str() {
            Some(text) => Self::parse(text),
            None => Err(TypeFailure::new(Self::STRING, Some(value.type_name())).into()),
        }
    }
}

impl From<Primitive> for Descriptor {
    fn from(kind: Primitive) -> Self {
        Self::Primitive(kind)
    }
}

impl From<CustomType> for Descriptor {
    fn from(custom: CustomType) -> Self {
        Self::Custom(custom)
    }
}

impl FromStr for Descriptor {
    type Err = EnsureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => f.write_str(kind.name()),
            Self::Absent => f.write_str("Nothing"),
            Self::Nullable(inner) => write!(f, "Nullable<{inner}>"),
            Self::Custom(custom) => f.write_str(custom.name()),
        }
    }
}

/// Wrap a descriptor so that the null marker is also accepted.
pub fn nullable(inner: impl Into<Descriptor>) -> Descriptor {
    Descriptor::nullable(inner)
}

/// The built-in descriptor kinds.
pub fn supported_types() -> Vec<Descriptor> {
    Primitive::ALL
        .iter()
        .copied()
        .map(Descriptor::from)
        .chain(std::iter::once(Descriptor::Absent))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Instance;

    #[test]
    fn parse_builtin_names() {
        assert_eq!(Descriptor::parse("string").unwrap(), Descriptor::STRING);
        assert_eq!(Descriptor::parse("Boolean").unwrap(), Descriptor::BOOLEAN);
        assert_eq!(Descriptor::parse(" NUMBER ").unwrap(), Descriptor::NUMBER);
        assert_eq!(Descriptor::parse("nothing").unwrap(), Descriptor::Absent);
    }

    #[test]
    fn parse_nullable_forms() {
        let expected = Descriptor::nullable(Primitive::String);
        assert_eq!(Descriptor::parse("?string").unwrap(), expected);
        assert_eq!(Descriptor::parse("Nullable<String>").unwrap(), expected);
        assert_eq!(
            "nullable<?number>".parse::<Descriptor>().unwrap(),
            Descriptor::nullable(Descriptor::nullable(Primitive::Number))
        );
    }

    #[test]
    fn parse_unknown_is_precondition_error() {
        let err = Descriptor::parse("integer").unwrap_err();
        assert!(err.is_precondition());
        assert!(Descriptor::parse("nullable<>").is_err());
    }

    #[test]
    fn parse_bounds_nullable_nesting() {
        let deepest = format!("{}string", "?".repeat(MAX_NULLABLE_DEPTH));
        let mut descriptor = Descriptor::parse(&deepest).unwrap();
        let mut layers = 0;
        while let Some(inner) = descriptor.inner().cloned() {
            descriptor = inner;
            layers += 1;
        }
        assert_eq!(layers, MAX_NULLABLE_DEPTH);
        assert_eq!(descriptor, Descriptor::STRING);

        let too_deep = format!("{}string", "?".repeat(MAX_NULLABLE_DEPTH + 1));
        assert!(Descriptor::parse(&too_deep).unwrap_err().is_precondition());

        let hostile = format!("{}string", "?".repeat(10_000));
        assert!(Descriptor::parse(&hostile).unwrap_err().is_precondition());

        let wrapped = format!(
            "{}number{}",
            "nullable<".repeat(10_000),
            ">".repeat(10_000)
        );
        assert!(Descriptor::parse(&wrapped).unwrap_err().is_precondition());
    }

    #[test]
    fn parse_mixed_nullable_forms() {
        assert_eq!(
            Descriptor::parse("? Nullable< ?boolean >").unwrap(),
            nullable(nullable(nullable(Primitive::Boolean)))
        );
        assert!(Descriptor::parse("nullable<string").is_err());
        assert!(Descriptor::parse("nullable<é>").is_err());
    }

    #[test]
    fn from_value_requires_a_string() {
        assert_eq!(
            Descriptor::from_value(&Value::from("array")).unwrap(),
            Descriptor::ARRAY
        );
        let err = Descriptor::from_value(&Value::Number(1.0)).unwrap_err();
        assert!(err.as_type_failure().is_some());
    }

    #[test]
    fn display_names() {
        assert_eq!(Descriptor::STRING.to_string(), "String");
        assert_eq!(Descriptor::Absent.to_string(), "Nothing");
        assert_eq!(nullable(Primitive::Array).to_string(), "Nullable<Array>");
        let point = Class::new("Point");
        assert_eq!(Descriptor::class(&point).to_string(), "Point");
    }

    #[test]
    fn supported_types_cover_every_builtin() {
        let types = supported_types();
        assert_eq!(types.len(), 7);
        assert!(types.contains(&Descriptor::FUNCTION));
        assert!(types.contains(&Descriptor::Absent));
        assert!(!types.iter().any(Descriptor::is_nullable));
    }

    #[test]
    fn class_descriptor_matches_instances_only() {
        let point = Class::new("Point");
        let custom = CustomType::class(&point);
        assert!(custom.matches(&Value::Instance(Instance::new(Arc::clone(&point)))));
        assert!(!custom.matches(&Value::Number(0.0)));
        assert!(!custom.matches(&Value::object([("x", 1)])));
    }

    #[test]
    fn class_descriptors_compare_by_class() {
        let point = Class::new("Point");
        let other = Class::new("Point");
        assert_eq!(Descriptor::class(&point), Descriptor::class(&point));
        assert_ne!(Descriptor::class(&point), Descriptor::class(&other));
        assert!(CustomType::class(&point)
            .backing_class()
            .is_some_and(|class| Arc::ptr_eq(class, &point)));

        let any = Descriptor::custom("Any", |_| true);
        assert_eq!(any, any.clone());
        assert_ne!(any, Descriptor::custom("Any", |_| true));
        assert_ne!(any, Descriptor::class(&point));
    }

    #[test]
    fn primitive_serde_names() {
        let kind: Primitive = serde_json::from_str("\"boolean\"").unwrap();
        assert_eq!(kind, Primitive::Boolean);
        assert_eq!(serde_json::to_string(&Primitive::Array).unwrap(), "\"array\"");
    }
}

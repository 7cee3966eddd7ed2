//! # ensure-core — Runtime Type Assertions
//!
//! Checks that an arbitrary runtime [`Value`] conforms to a [`Descriptor`],
//! either answering with a boolean (soft) or failing with a
//! [`TypeFailure`] (strict).
//!
//! ## Pieces
//!
//! - [`value`] — the dynamic value model (`Undefined`, `Null`, primitives,
//!   boxed primitives, arrays, objects, functions, class instances).
//! - [`descriptor`] — the closed set of descriptor kinds: `Primitive`,
//!   `Absent`, `Nullable(inner)` and `Custom`.
//! - [`predicates`] — pure membership tests (`is_string`, `is_number`,
//!   `is_in_range`, `is_in`, ...), each with an `is_not_*` counterpart.
//! - [`check`] — the engine: enforcement bypass, kind dispatch, and the
//!   soft/strict/forced failure policy.
//! - [`mode`] — the process-wide enforcement switch and scoped overrides.
//! - [`property`] — `has_property`, typed shortcuts, `require_defined`,
//!   `first_defined` and the instance-context guard.
//! - [`nullable`] — a null-or-typed value holder.
//!
//! ## Crate Policy
//!
//! - No I/O. Every operation is synchronous and completes before returning.
//! - The engine never logs and never retries; failures go to the caller.
//! - No `.unwrap()` outside tests.

pub mod check;
pub mod descriptor;
pub mod error;
pub mod mode;
pub mod nullable;
pub mod predicates;
pub mod property;
pub mod value;

pub use check::{check, conforms, ensure, ensure_forced, Checker, Strictness};
pub use descriptor::{
    nullable, supported_types, CustomType, Descriptor, Primitive, MAX_NULLABLE_DEPTH,
};
pub use error::{ArityError, EnsureError, EnsureResult, TypeFailure};
pub use mode::{
    is_enforced, set_enforced, strictly, with_enforcement, EnforcementGuard, EnforcementMode,
};
pub use nullable::NullableValue;
pub use property::{
    first_defined, has_function, has_number, has_object, has_property, has_string,
    is_constructed_with_new, require_constructed_with_new, require_defined,
};
pub use value::{Class, Function, Instance, Map, Value};

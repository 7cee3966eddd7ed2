//! # Check Engine
//!
//! Maps a value and a [`Descriptor`] to a verdict.
//!
//! ## Order of evaluation
//!
//! 1. Enforcement bypass: if enforcement is off and the call is not
//!    [`Strictness::Forced`], report success without looking at the value.
//! 2. Dispatch on the descriptor kind:
//!    - `Primitive` runs the kind's predicate;
//!    - `Absent` accepts only `Value::Undefined`;
//!    - `Nullable` accepts `Value::Null`, otherwise defers to the inner
//!      descriptor;
//!    - `Custom` runs the caller's membership test.
//! 3. On a mismatch, `Soft` returns `Ok(false)`; `Strict` and `Forced`
//!    return a [`TypeFailure`] naming the expected descriptor and the
//!    observed type.
//!
//! A match is always `Ok(true)`. The engine keeps no state between calls
//! and never logs.

use crate::descriptor::Descriptor;
use crate::error::TypeFailure;
use crate::mode::EnforcementMode;
use crate::value::Value;

/// How a mismatch is reported, and whether a disabled enforcement mode
/// may skip the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strictness {
    /// Fail with a [`TypeFailure`]; skipped while enforcement is off.
    #[default]
    Strict,
    /// Return `false`; skipped while enforcement is off.
    Soft,
    /// Fail with a [`TypeFailure`], even while enforcement is off.
    Forced,
}

impl Strictness {
    /// Map an optional "soft" flag: omitted is `Strict`, `true` is `Soft`,
    /// an explicit `false` is `Forced`.
    pub fn from_soft(soft: Option<bool>) -> Self {
        match soft {
            None => Self::Strict,
            Some(true) => Self::Soft,
            Some(false) => Self::Forced,
        }
    }

    /// True for [`Strictness::Soft`].
    pub fn is_soft(self) -> bool {
        self == Self::Soft
    }
}

/// A check engine bound to an enforcement mode.
///
/// `Checker::global()` follows the process-wide switch; the free functions
/// in this module use it. Build a checker with an explicit mode to keep a
/// component independent of the global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Checker {
    mode: EnforcementMode,
}

impl Checker {
    /// Checker with an explicit mode.
    pub const fn new(mode: EnforcementMode) -> Self {
        Self { mode }
    }

    /// Checker that follows the process-wide switch.
    pub const fn global() -> Self {
        Self::new(EnforcementMode::Global)
    }

    /// The mode this checker resolves enforcement from.
    pub fn mode(&self) -> EnforcementMode {
        self.mode
    }

    /// Check `value` against `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns a [`TypeFailure`] on a mismatch unless `strictness` is `Soft`.
    pub fn check(
        &self,
        value: &Value,
        descriptor: &Descriptor,
        strictness: Strictness,
    ) -> Result<bool, TypeFailure> {
        if strictness != Strictness::Forced && !self.mode.is_enforced() {
            return Ok(true);
        }

        if matches(value, descriptor) {
            Ok(true)
        } else if strictness.is_soft() {
            Ok(false)
        } else {
            Err(TypeFailure::new(descriptor.clone(), Some(value.type_name())))
        }
    }

    /// Strict check.
    pub fn ensure(&self, value: &Value, descriptor: &Descriptor) -> Result<(), TypeFailure> {
        self.check(value, descriptor, Strictness::Strict).map(|_| ())
    }

    /// Soft check.
    pub fn conforms(&self, value: &Value, descriptor: &Descriptor) -> bool {
        matches!(self.check(value, descriptor, Strictness::Soft), Ok(true))
    }
}

/// Pure dispatch, ignoring enforcement.
fn matches(value: &Value, descriptor: &Descriptor) -> bool {
    match descriptor {
        Descriptor::Primitive(kind) => kind.matches(value),
        Descriptor::Absent => value.is_undefined(),
        Descriptor::Nullable(inner) => value.is_null() || matches(value, inner),
        Descriptor::Custom(custom) => custom.matches(value),
    }
}

/// Check `value` against `descriptor` using the process-wide switch.
///
/// # Errors
///
/// Returns a [`TypeFailure`] on a mismatch unless `strictness` is `Soft`.
pub fn check(
    value: &Value,
    descriptor: &Descriptor,
    strictness: Strictness,
) -> Result<bool, TypeFailure> {
    Checker::global().check(value, descriptor, strictness)
}

/// Strict check against the process-wide switch.
pub fn ensure(value: &Value, descriptor: &Descriptor) -> Result<(), TypeFailure> {
    Checker::global().ensure(value, descriptor)
}

/// Strict check that runs even while enforcement is off.
pub fn ensure_forced(value: &Value, descriptor: &Descriptor) -> Result<(), TypeFailure> {
    Checker::global()
        .check(value, descriptor, Strictness::Forced)
        .map(|_| ())
}

/// Soft check against the process-wide switch.
pub fn conforms(value: &Value, descriptor: &Descriptor) -> bool {
    Checker::global().conforms(value, descriptor)
}

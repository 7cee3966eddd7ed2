//! # Function Shield
//!
//! Wraps a function value so that every call is checked:
//!
//! 1. The argument count must lie in `[min_args, max_args]`, where
//!    `max_args` is the length of the argument spec and `min_args`
//!    excludes the trailing `Nullable` entries. Violations are an
//!    [`ArityError`], whatever the enforcement mode.
//! 2. Each supplied argument is checked (strict) against its descriptor.
//! 3. The inner function runs with the bound context if one was given at
//!    wrap time, otherwise with the caller's context.
//! 4. A `Nothing` return type requires the function to return
//!    `Value::Undefined` (an [`ArityError`] otherwise); any other return
//!    type is checked strictly.
//!
//! Optional parameters must form a trailing run. A spec with a `Nullable`
//! entry before a required one is rejected when the shield is built.
//!
//! A shield holds no state between calls.

use ensure_core::{
    ensure, ArityError, Descriptor, EnsureError, EnsureResult, Function, Value,
};

/// A type-checked wrapper around a function value.
#[derive(Debug, Clone)]
pub struct Shield {
    arg_spec: Vec<Descriptor>,
    return_spec: Descriptor,
    function: Function,
    bound_context: Option<Value>,
    min_args: usize,
}

impl Shield {
    /// Wrap `function`.
    ///
    /// # Errors
    ///
    /// A type failure if `function` is not a function value; a precondition
    /// failure if a `Nullable` entry precedes a required one, or if
    /// enforcement is off and `function` still is not callable.
    pub fn new(
        arg_spec: Vec<Descriptor>,
        return_spec: Descriptor,
        function: &Value,
        bound_context: Option<Value>,
    ) -> EnsureResult<Self> {
        ensure(function, &Descriptor::FUNCTION)?;
        let function = function
            .as_function()
            .cloned()
            .ok_or_else(|| EnsureError::precondition("shield needs a callable function"))?;

        let min_args = required_arity(&arg_spec)?;
        tracing::trace!(
            function = function.name(),
            min_args,
            max_args = arg_spec.len(),
            returns = %return_spec,
            "shield built"
        );

        Ok(Self {
            arg_spec,
            return_spec,
            function,
            bound_context,
            min_args,
        })
    }

    /// Wrap `function`, reading the argument and return specs from
    /// dynamic values (an array of descriptor names, and a descriptor name).
    ///
    /// # Errors
    ///
    /// A type failure if `arg_spec` is not an array, if any descriptor is
    /// not a string, or if `function` is not a function.
    pub fn from_values(
        arg_spec: &Value,
        return_spec: &Value,
        function: &Value,
        bound_context: Option<Value>,
    ) -> EnsureResult<Self> {
        ensure(arg_spec, &Descriptor::ARRAY)?;
        let arg_spec = arg_spec
            .as_array()
            .unwrap_or_default()
            .iter()
            .map(Descriptor::from_value)
            .collect::<EnsureResult<Vec<_>>>()?;
        let return_spec = Descriptor::from_value(return_spec)?;
        Self::new(arg_spec, return_spec, function, bound_context)
    }

    /// Wrap a Rust closure directly.
    pub fn from_fn<F>(
        arg_spec: Vec<Descriptor>,
        return_spec: Descriptor,
        name: impl Into<String>,
        f: F,
    ) -> EnsureResult<Self>
    where
        F: Fn(&Value, &[Value]) -> EnsureResult<Value> + Send + Sync + 'static,
    {
        Self::new(
            arg_spec,
            return_spec,
            &Value::Function(Function::new(name, f)),
            None,
        )
    }

    /// Fewest arguments accepted.
    pub fn min_args(&self) -> usize {
        self.min_args
    }

    /// Most arguments accepted.
    pub fn max_args(&self) -> usize {
        self.arg_spec.len()
    }

    /// Argument descriptors, in position order.
    pub fn arg_spec(&self) -> &[Descriptor] {
        &self.arg_spec
    }

    /// Return descriptor.
    pub fn return_spec(&self) -> &Descriptor {
        &self.return_spec
    }

    /// Call with an undefined caller context.
    pub fn call(&self, args: &[Value]) -> EnsureResult<Value> {
        self.call_with(&Value::Undefined, args)
    }

    /// Call with an explicit caller context. A context bound at wrap time
    /// takes precedence.
    ///
    /// # Errors
    ///
    /// An [`ArityError`] for a bad argument count or an unexpected return
    /// value, a type failure for a mistyped argument or return value, or
    /// whatever the inner function returns.
    pub fn call_with(&self, this: &Value, args: &[Value]) -> EnsureResult<Value> {
        if args.len() < self.min_args || args.len() > self.max_args() {
            tracing::debug!(
                function = self.function.name(),
                actual = args.len(),
                min = self.min_args,
                max = self.max_args(),
                "shielded call rejected"
            );
            return Err(ArityError::ArgumentCount {
                min: self.min_args,
                max: self.max_args(),
                actual: args.len(),
            }
            .into());
        }

        for (arg, descriptor) in args.iter().zip(&self.arg_spec) {
            ensure(arg, descriptor)?;
        }

        let context = self.bound_context.as_ref().unwrap_or(this);
        let result = self.function.call(context, args)?;

        if self.return_spec.is_absent() {
            if !result.is_undefined() {
                return Err(ArityError::UnexpectedReturn {
                    actual: result.type_name(),
                }
                .into());
            }
        } else {
            ensure(&result, &self.return_spec)?;
        }

        Ok(result)
    }

    /// Turn the shield into a plain function value.
    pub fn into_function(self) -> Function {
        let name = self.function.name().to_string();
        Function::new(name, move |this, args| self.call_with(this, args))
    }
}

/// Wrap `function` and return the shielded function value.
///
/// # Errors
///
/// See [`Shield::new`].
pub fn shield(
    arg_spec: Vec<Descriptor>,
    return_spec: Descriptor,
    function: &Value,
    bound_context: Option<Value>,
) -> EnsureResult<Function> {
    Shield::new(arg_spec, return_spec, function, bound_context).map(Shield::into_function)
}

fn required_arity(arg_spec: &[Descriptor]) -> EnsureResult<usize> {
    let required = arg_spec.iter().take_while(|d| !d.is_nullable()).count();
    if let Some(position) = arg_spec[required..].iter().position(|d| !d.is_nullable()) {
        return Err(EnsureError::precondition(format!(
            "argument {} is required but follows an optional argument",
            required + position
        )));
    }
    Ok(required)
}

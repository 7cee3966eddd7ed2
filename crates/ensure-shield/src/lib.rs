//! # ensure-shield — Type-Checked Function Wrappers
//!
//! A [`Shield`] pairs a function value with an argument spec and a return
//! spec and checks both on every call. See [`shield`] for the rules.
//!
//! ```
//! use ensure_core::{Descriptor, Function, Value};
//! use ensure_shield::Shield;
//!
//! let negate = Shield::new(
//!     vec![Descriptor::BOOLEAN],
//!     Descriptor::BOOLEAN,
//!     &Value::Function(Function::new("negate", |_, args| {
//!         Ok(Value::Bool(!matches!(args.first(), Some(Value::Bool(true)))))
//!     })),
//!     None,
//! )
//! .unwrap();
//!
//! assert_eq!(negate.call(&[Value::Bool(true)]).unwrap(), Value::Bool(false));
//! assert!(negate.call(&[Value::from("yes")]).is_err());
//! assert!(negate.call(&[]).is_err());
//! ```

pub mod shield;

pub use shield::{shield, Shield};

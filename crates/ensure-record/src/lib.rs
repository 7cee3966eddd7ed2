//! # ensure-record — Field-Checked Value Objects
//!
//! Derives record types from a field → descriptor specification. Records
//! have a fixed set of fields, and every write to a field is checked
//! against its descriptor before it takes effect.
//!
//! ```
//! use ensure_core::{Descriptor, Value};
//! use ensure_record::{RecordSpec, RecordType};
//!
//! let person = RecordType::new("Person", RecordSpec::new().field("name", Descriptor::STRING));
//! let mut bob = person.construct_json(&serde_json::json!({"name": "Bob"})).unwrap();
//!
//! assert!(bob.set("name", Value::from(42)).is_err());
//! assert_eq!(bob.get("name"), Some(&Value::from("Bob")));
//! ```

pub mod record;
pub mod spec;

pub use record::{build_record_type, record_base_class, Record, RecordType};
pub use spec::RecordSpec;

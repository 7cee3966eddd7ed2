//! Record writes under a disabled enforcement mode.

use ensure_core::{Descriptor, EnforcementGuard, Value};
use ensure_record::{RecordSpec, RecordType};
use serde_json::json;
use serial_test::serial;

fn person() -> RecordType {
    RecordType::new("Person", RecordSpec::new().field("name", Descriptor::STRING))
}

#[test]
#[serial]
fn writes_are_unchecked_while_disabled() {
    let mut record = person().construct_json(&json!({"name": "Bob"})).unwrap();

    let _guard = EnforcementGuard::set(false);
    record.set("name", Value::from(42)).unwrap();
    assert_eq!(record.get("name"), Some(&Value::from(42)));
}

#[test]
#[serial]
fn records_stay_sealed_while_disabled() {
    let _guard = EnforcementGuard::set(false);
    let mut record = person().construct_json(&json!({"name": 1})).unwrap();
    assert!(record.set("email", Value::from("x")).unwrap_err().is_precondition());
}

#[test]
#[serial]
fn writes_are_checked_by_default() {
    let mut record = person().construct_json(&json!({"name": "Bob"})).unwrap();
    assert!(record.set("name", Value::from(42)).is_err());
}

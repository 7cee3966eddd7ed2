//! Process-wide enforcement switch.
//!
//! Every test here touches the global flag, so they run serially and each
//! restores the default through a guard.

use ensure_core::{
    check, conforms, ensure, ensure_forced, is_enforced, predicates, set_enforced, strictly,
    with_enforcement, Descriptor, EnforcementGuard, NullableValue, Strictness, Value,
};
use serde_json::json;
use serial_test::serial;

#[test]
#[serial]
fn enabled_by_default() {
    assert!(is_enforced());
}

#[test]
#[serial]
fn disabled_mode_reports_success() {
    let _guard = EnforcementGuard::set(false);

    let array = Value::from(json!([]));
    assert!(ensure(&array, &Descriptor::STRING).is_ok());
    assert!(check(&array, &Descriptor::STRING, Strictness::Strict).unwrap());
    assert!(conforms(&array, &Descriptor::STRING));
}

#[test]
#[serial]
fn forced_check_overrides_disabled_mode() {
    let _guard = EnforcementGuard::set(false);

    let array = Value::from(json!([]));
    assert!(check(&array, &Descriptor::STRING, Strictness::Forced).is_err());
    assert!(ensure_forced(&array, &Descriptor::STRING).is_err());
    assert!(ensure_forced(&Value::from("ok"), &Descriptor::STRING).is_ok());
}

#[test]
#[serial]
fn guard_restores_previous_value() {
    {
        let guard = EnforcementGuard::set(false);
        assert!(guard.previous());
        assert!(!is_enforced());
        {
            let _inner = EnforcementGuard::set(true);
            assert!(is_enforced());
        }
        assert!(!is_enforced());
    }
    assert!(is_enforced());
}

#[test]
#[serial]
fn scoped_helpers() {
    let result = with_enforcement(false, || {
        assert!(!is_enforced());
        strictly(|| {
            assert!(is_enforced());
            ensure(&Value::Null, &Descriptor::OBJECT).is_err()
        })
    });
    assert!(result);
    assert!(is_enforced());
}

#[test]
#[serial]
fn set_enforced_returns_previous() {
    assert!(set_enforced(false));
    assert!(!set_enforced(true));
    assert!(is_enforced());
}

#[test]
#[serial]
fn membership_skips_haystack_check_when_disabled() {
    let not_an_array = Value::from(json!({"a": 1}));
    assert!(predicates::is_in(&Value::from(1), &not_an_array).is_err());

    let _guard = EnforcementGuard::set(false);
    assert_eq!(predicates::is_in(&Value::from(1), &not_an_array).ok(), Some(false));
}

#[test]
#[serial]
fn nullable_holder_follows_the_switch() {
    let mut holder = NullableValue::new(Descriptor::ARRAY, None).unwrap();
    assert!(holder.set_value(Value::from("hi")).is_err());

    let _guard = EnforcementGuard::set(false);
    assert!(holder.set_value(Value::from("hi")).is_ok());
}

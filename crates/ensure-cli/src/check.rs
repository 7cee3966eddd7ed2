//! # `ensure check`
//!
//! Checks one JSON value against a descriptor.
//!
//! ```bash
//! ensure check --type string '"hello"'
//! ensure check --type '?number' null
//! echo '[1, 2]' | ensure check --type array -
//! ensure --no-enforce check --force --type boolean 3
//! ```
//!
//! Prints `ok` or `mismatch` and exits 0 or 1 respectively.

use std::io::Read;

use anyhow::{Context, Result};
use clap::Args;

use ensure_core::{Checker, Descriptor, Strictness, Value};

/// Arguments for `ensure check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Descriptor to check against (e.g. `string`, `?number`, `nullable<array>`).
    #[arg(long = "type", value_name = "DESCRIPTOR")]
    pub descriptor: String,

    /// Report a mismatch without the failure message.
    #[arg(long, conflicts_with = "force")]
    pub soft: bool,

    /// Check even when enforcement is disabled.
    #[arg(long)]
    pub force: bool,

    /// JSON literal to check, or `-` to read it from stdin.
    pub input: String,
}

impl CheckArgs {
    /// Strictness selected by the flags.
    pub fn strictness(&self) -> Strictness {
        if self.soft {
            Strictness::Soft
        } else if self.force {
            Strictness::Forced
        } else {
            Strictness::Strict
        }
    }
}

/// Result of a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Match,
    /// Carries the failure message for strict checks.
    Mismatch(Option<String>),
}

/// Parse `input` as JSON and check it against `descriptor`.
pub fn evaluate(
    checker: Checker,
    input: &str,
    descriptor: &Descriptor,
    strictness: Strictness,
) -> Result<CheckOutcome> {
    let json: serde_json::Value =
        serde_json::from_str(input).context("input is not valid JSON")?;
    let value = Value::from(json);

    Ok(match checker.check(&value, descriptor, strictness) {
        Ok(true) => CheckOutcome::Match,
        Ok(false) => CheckOutcome::Mismatch(None),
        Err(failure) => CheckOutcome::Mismatch(Some(failure.to_string())),
    })
}

/// Execute `ensure check`.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let descriptor = Descriptor::parse(&args.descriptor)?;
    let input = read_input(&args.input)?;
    tracing::debug!(descriptor = %descriptor, strictness = ?args.strictness(), "checking value");

    match evaluate(Checker::global(), &input, &descriptor, args.strictness())? {
        CheckOutcome::Match => {
            println!("ok");
            Ok(0)
        }
        CheckOutcome::Mismatch(message) => {
            println!("mismatch");
            if let Some(message) = message {
                eprintln!("{message}");
            }
            Ok(1)
        }
    }
}

fn read_input(input: &str) -> Result<String> {
    if input != "-" {
        return Ok(input.to_string());
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ensure_core::EnforcementMode;

    const ON: Checker = Checker::new(EnforcementMode::Enabled);
    const OFF: Checker = Checker::new(EnforcementMode::Disabled);

    #[test]
    fn matching_value() {
        let outcome = evaluate(ON, r#""hello""#, &Descriptor::STRING, Strictness::Strict).unwrap();
        assert_eq!(outcome, CheckOutcome::Match);
    }

    #[test]
    fn strict_mismatch_carries_message() {
        let outcome = evaluate(ON, "[1, 2]", &Descriptor::STRING, Strictness::Strict).unwrap();
        match outcome {
            CheckOutcome::Mismatch(Some(message)) => assert!(message.contains("array")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn soft_mismatch_is_silent() {
        let outcome = evaluate(ON, "3", &Descriptor::BOOLEAN, Strictness::Soft).unwrap();
        assert_eq!(outcome, CheckOutcome::Mismatch(None));
    }

    #[test]
    fn nullable_descriptor_from_text() {
        let descriptor = Descriptor::parse("?number").unwrap();
        for input in ["null", "4.5"] {
            let outcome = evaluate(ON, input, &descriptor, Strictness::Strict).unwrap();
            assert_eq!(outcome, CheckOutcome::Match, "{input}");
        }
    }

    #[test]
    fn disabled_checker_passes_unless_forced() {
        let outcome = evaluate(OFF, "3", &Descriptor::STRING, Strictness::Strict).unwrap();
        assert_eq!(outcome, CheckOutcome::Match);
        assert!(matches!(
            evaluate(OFF, "3", &Descriptor::STRING, Strictness::Forced).unwrap(),
            CheckOutcome::Mismatch(Some(_))
        ));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(evaluate(ON, "{not json", &Descriptor::OBJECT, Strictness::Strict).is_err());
    }

    #[test]
    fn literal_input_is_passed_through() {
        assert_eq!(read_input("[1]").unwrap(), "[1]");
    }
}

//! # ensure-cli — Command-Line Front End
//!
//! Provides the `ensure` binary.
//!
//! ## Subcommands
//!
//! - `ensure check` — check a JSON value against a descriptor.
//! - `ensure record` — build a record from a schema file and a values file.
//! - `ensure types` — list the descriptor kinds.
//!
//! ## Enforcement
//!
//! The global switch is resolved by [`config::resolve_enforcement`] before
//! any subcommand runs:
//!
//! ```bash
//! ensure --config ensure.yaml check --type string '"x"'
//! ENSURE_ENFORCE=off ensure check --type string 3        # ok
//! ensure --no-enforce check --force --type string 3      # mismatch
//! ```

pub mod check;
pub mod config;
pub mod record;
pub mod types;

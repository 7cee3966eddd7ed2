//! # `ensure record`
//!
//! Builds a record type from a schema file and constructs one record from a
//! values file, printing the record as JSON.
//!
//! ```bash
//! ensure record --schema person.schema.json --values bob.json
//! ```
//!
//! The schema is a JSON object mapping field names to descriptor strings:
//!
//! ```json
//! { "name": "string", "age": "?number" }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use ensure_record::{Record, RecordType};

/// Arguments for `ensure record`.
#[derive(Args, Debug)]
pub struct RecordArgs {
    /// JSON schema file: field name → descriptor.
    #[arg(long)]
    pub schema: PathBuf,

    /// JSON file with the initial field values.
    #[arg(long)]
    pub values: PathBuf,

    /// Name given to the record type.
    #[arg(long, default_value = "Record")]
    pub name: String,
}

/// Build the record described by `schema` and `values`.
pub fn build_record(name: &str, schema: &Path, values: &Path) -> Result<Record> {
    let schema = read_json(schema)?;
    let values = read_json(values)?;

    let record_type = RecordType::from_schema(name, &schema.into())
        .context("invalid record schema")?;
    record_type
        .construct_json(&values)
        .context("values do not fit the record schema")
}

/// Execute `ensure record`.
pub fn run_record(args: &RecordArgs) -> Result<u8> {
    let record = build_record(&args.name, &args.schema, &args.values)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(0)
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

//! # `ensure types`
//!
//! Lists the descriptor kinds accepted by `--type` and record schemas.

use anyhow::Result;

use ensure_core::supported_types;

/// Descriptor names as accepted on the command line.
pub fn type_names() -> Vec<String> {
    supported_types()
        .iter()
        .map(|d| d.to_string().to_ascii_lowercase())
        .collect()
}

/// Execute `ensure types`.
pub fn run_types() -> Result<u8> {
    for name in type_names() {
        println!("  {name}");
    }
    println!();
    println!("Prefix any type with `?` (or wrap it in nullable<...>) to also accept null.");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ensure_core::Descriptor;

    #[test]
    fn every_listed_name_parses() {
        let names = type_names();
        assert_eq!(names.len(), supported_types().len());
        for name in &names {
            assert!(Descriptor::parse(name).is_ok(), "{name}");
            assert!(Descriptor::parse(&format!("?{name}")).unwrap().is_nullable());
        }
        assert!(names.iter().any(|n| n == "string"));
        assert!(names.iter().any(|n| n == "nothing"));
    }
}

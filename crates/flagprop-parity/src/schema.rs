//! Operator extraction from a JSON schema document
//!
//! The schema is the source of truth: its `enum` list already holds wire
//! names, so no canonicalization is applied.

use crate::error::{ParityError, Result};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

/// Read `definitions.<definition>.enum` from the schema at `path`
pub fn load_schema_operators(path: &Path, definition: &str) -> Result<BTreeSet<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| ParityError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value = serde_json::from_str(&content).map_err(|source| ParityError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    extract_schema_operators(&document, definition).map_err(|detail| ParityError::SchemaShape {
        path: path.to_path_buf(),
        definition: definition.to_string(),
        detail,
    })
}

/// Pull the operator names out of a parsed schema. Both `definitions` and
/// `$defs` are accepted.
pub fn extract_schema_operators(
    document: &Value,
    definition: &str,
) -> std::result::Result<BTreeSet<String>, String> {
    let definitions = document
        .get("definitions")
        .or_else(|| document.get("$defs"))
        .ok_or_else(|| "no \"definitions\" section".to_string())?;

    let entry = definitions
        .get(definition)
        .ok_or_else(|| format!("no definition named \"{}\"", definition))?;

    let values = entry
        .get("enum")
        .and_then(Value::as_array)
        .ok_or_else(|| "definition has no \"enum\" array".to_string())?;

    let mut operators = BTreeSet::new();
    for value in values {
        match value.as_str() {
            Some(name) => {
                operators.insert(name.to_string());
            }
            None => return Err(format!("non-string enum entry {}", value)),
        }
    }

    if operators.is_empty() {
        return Err("\"enum\" array is empty".to_string());
    }

    tracing::debug!("Extracted {} operators from {}", operators.len(), definition);
    Ok(operators)
}

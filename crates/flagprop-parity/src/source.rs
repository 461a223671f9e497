//! Operator extraction from the evaluator side
//!
//! For Rust source the `pub enum <Name> { ... }` block is located with a
//! regex and its variants are read as bare identifiers. This is a text
//! scrape, not a parse: a struct-like variant (`Foo { .. }`) ends the block
//! early, and a count below the configured floor is treated as a broken
//! parse rather than a shrunken enum.

use crate::config::{ArtifactFormat, ParityConfig};
use crate::error::{ParityError, Result};
use crate::schema;
use flagprop_core::{acronym_run, pascal_to_snake};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;

/// A variant whose name contains consecutive capitals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcronymWarning {
    pub variant: String,
    pub run: String,
    pub canonical: String,
}

/// Operators read from the evaluator artifact
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceOperators {
    /// Names as written in the artifact
    pub raw: Vec<String>,
    /// Canonical wire names
    pub canonical: BTreeSet<String>,
    pub acronym_warnings: Vec<AcronymWarning>,
}

/// Load the evaluator operators described by `config`
pub fn load_source_operators(config: &ParityConfig) -> Result<SourceOperators> {
    let path = config.source_path.as_path();

    match config.source_format {
        ArtifactFormat::JsonSchema => {
            let canonical = schema::load_schema_operators(path, &config.enum_name)?;
            Ok(SourceOperators {
                raw: canonical.iter().cloned().collect(),
                canonical,
                acronym_warnings: Vec::new(),
            })
        }
        ArtifactFormat::RustEnum => {
            let content = std::fs::read_to_string(path).map_err(|source| ParityError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            scrape_rust_enum(
                &content,
                path,
                &config.enum_name,
                config.min_expected_variants,
            )
        }
    }
}

/// Scrape and canonicalize the variants of `enum_name` from Rust source.
/// `path` is only used in error messages.
pub fn scrape_rust_enum(
    content: &str,
    path: &Path,
    enum_name: &str,
    min_expected_variants: usize,
) -> Result<SourceOperators> {
    let raw = extract_enum_variants(content, enum_name).ok_or_else(|| {
        ParityError::EnumNotFound {
            path: path.to_path_buf(),
            enum_name: enum_name.to_string(),
        }
    })?;

    if raw.is_empty() {
        return Err(ParityError::NoVariants {
            path: path.to_path_buf(),
            enum_name: enum_name.to_string(),
        });
    }
    if raw.len() < min_expected_variants {
        return Err(ParityError::BelowFloor {
            path: path.to_path_buf(),
            enum_name: enum_name.to_string(),
            found: raw.len(),
            minimum: min_expected_variants,
        });
    }

    let mut canonical = BTreeSet::new();
    let mut acronym_warnings = Vec::new();
    for variant in &raw {
        let snake = pascal_to_snake(variant);
        if let Some(run) = acronym_run(variant) {
            tracing::warn!("{} contains capital run '{}'", variant, run);
            acronym_warnings.push(AcronymWarning {
                variant: variant.clone(),
                run: run.to_string(),
                canonical: snake.clone(),
            });
        }
        canonical.insert(snake);
    }

    tracing::debug!("Extracted {} variants from {}", raw.len(), enum_name);
    Ok(SourceOperators {
        raw,
        canonical,
        acronym_warnings,
    })
}

/// Variant names of `pub enum <enum_name>`, in declaration order.
/// Returns `None` when the enum block is not found.
pub fn extract_enum_variants(content: &str, enum_name: &str) -> Option<Vec<String>> {
    let block = Regex::new(&format!(
        r"pub\s+enum\s+{}\s*\{{([^}}]+)\}}",
        regex::escape(enum_name)
    ))
    .ok()?;
    let body = block.captures(content)?.get(1)?.as_str();

    let block_comments = Regex::new(r"(?s)/\*.*?\*/").ok()?;
    let attributes = Regex::new(r"#\[[^\]]*\]").ok()?;
    let identifier = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").ok()?;

    let body = block_comments.replace_all(body, "");
    let mut variants = Vec::new();

    for line in body.lines() {
        let line = line.split("//").next().unwrap_or("");
        let line = attributes.replace_all(line, "");

        for token in line.split(',') {
            let token = token.trim();
            if let Some(name) = identifier.find(token) {
                variants.push(name.as_str().to_string());
            }
        }
    }

    Some(variants)
}

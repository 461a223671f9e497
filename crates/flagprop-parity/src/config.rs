//! Verifier configuration
//!
//! Defaults describe this repository's own artifacts. A `config/parity`
//! file (any format the `config` crate understands) or `FLAGPROP_PARITY_*`
//! environment variables override individual fields. A file that sets an
//! allowlist replaces the built-in one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Which artifact an allowlist entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The schema (source of truth)
    Left,
    /// The evaluator enum
    Right,
}

/// How an artifact is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactFormat {
    /// `definitions.<name>.enum` in a JSON schema document
    #[default]
    JsonSchema,
    /// `pub enum <name> { ... }` scraped from Rust source
    RustEnum,
}

/// An operator allowed to exist on one side only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowlistEntry {
    pub operator_name: String,
    pub reason: String,
    pub side: Side,
}

/// Parity verifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParityConfig {
    /// Schema document holding the canonical operator list
    pub schema_path: PathBuf,

    /// Definition inside the schema whose `enum` lists the operators
    pub schema_definition: String,

    /// Evaluator artifact
    pub source_path: PathBuf,

    /// Evaluator artifact format
    pub source_format: ArtifactFormat,

    /// Enum (or schema definition) name inside the evaluator artifact
    pub enum_name: String,

    /// Minimum number of evaluator variants for a parse to be trusted
    pub min_expected_variants: usize,

    /// Operators that exist only in the schema, with the reason
    pub left_only_allowlist: BTreeMap<String, String>,

    /// Operators that exist only in the evaluator, with the reason
    pub right_only_allowlist: BTreeMap<String, String>,
}

impl Default for ParityConfig {
    fn default() -> Self {
        Self {
            schema_path: PathBuf::from("schema/property_operator.schema.json"),
            schema_definition: "PropertyOperator".to_string(),
            source_path: PathBuf::from("crates/flagprop-core/src/operator.rs"),
            source_format: ArtifactFormat::RustEnum,
            enum_name: "OperatorKind".to_string(),
            min_expected_variants: 20,
            left_only_allowlist: default_left_only_allowlist(),
            right_only_allowlist: BTreeMap::new(),
        }
    }
}

/// Schema operators the evaluator deliberately does not implement
fn default_left_only_allowlist() -> BTreeMap<String, String> {
    [
        ("between", "Range comparison, only used in HogQL insights queries"),
        ("not_between", "Range comparison, only used in HogQL insights queries"),
        ("min", "Alias for gte, only used in HogQL insights queries"),
        ("max", "Alias for lte, only used in HogQL insights queries"),
        (
            "is_cleaned_path_exact",
            "Path normalization, only used in HogQL path analysis",
        ),
    ]
    .into_iter()
    .map(|(name, reason)| (name.to_string(), reason.to_string()))
    .collect()
}

impl ParityConfig {
    /// Load configuration from `.env`, an optional config file and the
    /// environment, on top of the defaults
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let file = match config_file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config/parity").required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("FLAGPROP_PARITY")
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to load parity config: {}", e))?;

        settings
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize parity config: {}", e))
    }

    /// Both allowlists as flat entries, left side first
    pub fn allowlist_entries(&self) -> Vec<AllowlistEntry> {
        let left = self.left_only_allowlist.iter().map(|(name, reason)| AllowlistEntry {
            operator_name: name.clone(),
            reason: reason.clone(),
            side: Side::Left,
        });
        let right = self.right_only_allowlist.iter().map(|(name, reason)| AllowlistEntry {
            operator_name: name.clone(),
            reason: reason.clone(),
            side: Side::Right,
        });
        left.chain(right).collect()
    }

    /// Label used for the schema side in reports
    pub fn left_label(&self) -> String {
        format!("schema {}", self.schema_definition)
    }

    /// Label used for the evaluator side in reports
    pub fn right_label(&self) -> String {
        format!("evaluator {}", self.enum_name)
    }
}

//! Parity verifier error types
//!
//! Every variant names the artifact that could not be read, so a failing CI
//! run distinguishes a broken input from a real operator gap.

use std::path::PathBuf;
use thiserror::Error;

/// Parity verifier error
#[derive(Error, Debug)]
pub enum ParityError {
    /// Artifact could not be read
    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Schema artifact is not valid JSON
    #[error("Could not parse {path} as JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Schema artifact lacks the expected enum definition
    #[error("Could not find {definition} enum in {path}: {detail}")]
    SchemaShape {
        path: PathBuf,
        definition: String,
        detail: String,
    },

    /// Source artifact has no matching enum block
    #[error("Could not find {enum_name} enum in {path}")]
    EnumNotFound { path: PathBuf, enum_name: String },

    /// Enum block found but no variants extracted
    #[error("Could not parse variants from {enum_name} enum in {path}")]
    NoVariants { path: PathBuf, enum_name: String },

    /// Fewer variants than the configured floor
    #[error(
        "Only parsed {found} {enum_name} variants from {path} (expected >= {minimum}). \
         The enum parser may be broken: check for unexpected formatting in {enum_name}."
    )]
    BelowFloor {
        path: PathBuf,
        enum_name: String,
        found: usize,
        minimum: usize,
    },
}

impl ParityError {
    /// True when the failure points at the text scraper rather than the input
    pub fn is_parser_breakage(&self) -> bool {
        matches!(
            self,
            ParityError::NoVariants { .. } | ParityError::BelowFloor { .. }
        )
    }
}

/// Result type for parity operations
pub type Result<T> = std::result::Result<T, ParityError>;

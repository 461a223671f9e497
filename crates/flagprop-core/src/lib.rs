//! flagprop Core - Core types for feature-flag property matching
//!
//! This crate provides the fundamental types shared by the matcher and
//! the parity verifier:
//! - Value types for property data
//! - The closed operator taxonomy and its naming canonicalization
//! - Property conditions and match outcomes
//! - Error types

pub mod canonical;
pub mod condition;
pub mod error;
pub mod operator;
pub mod outcome;
pub mod types;

// Re-export commonly used types
pub use canonical::{acronym_run, pascal_to_snake};
pub use condition::{PropertyCondition, PropertyType};
pub use error::CoreError;
pub use operator::{Arity, OperatorFamily, OperatorKind, ValueType};
pub use outcome::{IndeterminateReason, MatchResult};
pub use types::Value;

//! Runtime error types

use thiserror::Error;

/// Error returned by an injected flag or cohort resolver
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// Dependency chain loops back on itself
    #[error("Circular dependency: {0}")]
    CircularDependency(String),

    /// Backing store lookup failed
    #[error("Lookup failed: {0}")]
    LookupFailed(String),

    /// Resolver panicked while resolving
    #[error("Resolver panicked: {0}")]
    Panicked(String),
}

/// Result type for resolver operations
pub type Result<T> = std::result::Result<T, ResolverError>;

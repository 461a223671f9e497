//! flagprop Parity - Operator parity verification
//!
//! Checks that two independently maintained definitions of the property
//! operator set agree:
//! - the left side: a JSON schema `enum` (source of truth, snake_case)
//! - the right side: a Rust `enum` block scraped from source text
//!   (PascalCase variants, canonicalized to snake_case), or a second JSON
//!   schema when a structured export is available
//!
//! Intentional gaps are declared in per-side allowlists with a reason.
//! The tool only reads its inputs and writes a report.

pub mod config;
pub mod error;
pub mod report;
pub mod schema;
pub mod source;
pub mod verifier;

pub use config::{AllowlistEntry, ArtifactFormat, ParityConfig, Side};
pub use error::{ParityError, Result};
pub use report::{ParityReport, Verdict};
pub use verifier::{execute, verify};

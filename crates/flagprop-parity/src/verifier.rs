//! Parity check driver

use crate::config::ParityConfig;
use crate::error::Result;
use crate::report::{render_failure, ParityReport};
use crate::schema::load_schema_operators;
use crate::source::load_source_operators;
use std::io::{self, Write};

/// Read both artifacts and compare them
pub fn verify(config: &ParityConfig) -> Result<ParityReport> {
    let left = load_schema_operators(&config.schema_path, &config.schema_definition)?;
    let right = load_source_operators(config)?;

    tracing::info!(
        "Comparing {} schema operators with {} evaluator operators",
        left.len(),
        right.canonical.len()
    );

    Ok(ParityReport::compute(
        config,
        &left,
        &right.canonical,
        right.acronym_warnings,
    ))
}

/// Run the check, write the report to `out` and return the process exit
/// code: 0 when in sync or only warnings were found, 1 otherwise.
pub fn execute<W: Write>(config: &ParityConfig, out: &mut W) -> io::Result<u8> {
    match verify(config) {
        Ok(report) => {
            report.render(out)?;
            Ok(report.exit_code())
        }
        Err(e) => {
            tracing::error!("Parity check could not run: {}", e);
            render_failure(&e, out)?;
            Ok(1)
        }
    }
}

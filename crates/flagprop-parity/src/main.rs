//! flagprop-parity
//!
//! Fails CI when the operator schema and the evaluator's operator enum drift
//! apart without an allowlisted reason.

use anyhow::Result;
use clap::Parser;
use flagprop_parity::{execute, ParityConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Check that two operator definitions agree
#[derive(Parser, Debug)]
#[command(name = "flagprop-parity", version, about)]
struct Args {
    /// Config file (defaults to an optional config/parity.* in the working directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Schema document holding the canonical operator enum
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Evaluator source holding the operator enum
    #[arg(long)]
    source: Option<PathBuf>,

    /// Minimum number of evaluator variants for a parse to be trusted
    #[arg(long)]
    min_variants: Option<usize>,
}

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(Args::parse()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            println!("ERROR: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<u8> {
    let mut config = ParityConfig::load(args.config.as_deref())?;
    if let Some(schema) = args.schema {
        config.schema_path = schema;
    }
    if let Some(source) = args.source {
        config.source_path = source;
    }
    if let Some(min) = args.min_variants {
        config.min_expected_variants = min;
    }
    tracing::debug!("Loaded configuration: {:?}", config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    Ok(execute(&config, &mut out)?)
}

/// Logs go to stderr so the report on stdout stays clean
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flagprop_parity=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

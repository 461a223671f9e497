//! Parity report
//!
//! Gap categories, verdict and the human-readable rendering printed by the
//! `flagprop-parity` binary.

use crate::config::ParityConfig;
use crate::error::ParityError;
use crate::source::AcronymWarning;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};
use std::path::PathBuf;

const RULE_WIDTH: usize = 60;

/// Overall outcome of a parity check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    InSync,
    PassedWithWarnings,
    Failed,
}

impl Verdict {
    pub fn exit_code(&self) -> u8 {
        match self {
            Verdict::InSync | Verdict::PassedWithWarnings => 0,
            Verdict::Failed => 1,
        }
    }
}

/// Result of comparing the two operator sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityReport {
    pub left_label: String,
    pub right_label: String,
    pub left_count: usize,
    pub right_count: usize,
    pub left_allowlist_count: usize,
    pub right_allowlist_count: usize,

    /// Gaps not covered by an allowlist
    pub unexpected_left_only: Vec<String>,
    pub unexpected_right_only: Vec<String>,

    /// Gaps covered by an allowlist, with their reason
    pub allowed_left_only: Vec<(String, String)>,
    pub allowed_right_only: Vec<(String, String)>,

    /// Allowlist entries whose operator is not actually one-sided
    pub stale_left: Vec<String>,
    pub stale_right: Vec<String>,

    pub acronym_warnings: Vec<AcronymWarning>,

    schema_path: PathBuf,
    source_path: PathBuf,
}

impl ParityReport {
    /// Compare canonical operator sets against the configured allowlists
    pub fn compute(
        config: &ParityConfig,
        left: &BTreeSet<String>,
        right: &BTreeSet<String>,
        acronym_warnings: Vec<AcronymWarning>,
    ) -> Self {
        let left_only: BTreeSet<&String> = left.difference(right).collect();
        let right_only: BTreeSet<&String> = right.difference(left).collect();

        let (unexpected_left_only, allowed_left_only, stale_left) =
            classify(&left_only, &config.left_only_allowlist);
        let (unexpected_right_only, allowed_right_only, stale_right) =
            classify(&right_only, &config.right_only_allowlist);

        Self {
            left_label: config.left_label(),
            right_label: config.right_label(),
            left_count: left.len(),
            right_count: right.len(),
            left_allowlist_count: config.left_only_allowlist.len(),
            right_allowlist_count: config.right_only_allowlist.len(),
            unexpected_left_only,
            unexpected_right_only,
            allowed_left_only,
            allowed_right_only,
            stale_left,
            stale_right,
            acronym_warnings,
            schema_path: config.schema_path.clone(),
            source_path: config.source_path.clone(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.unexpected_left_only.is_empty() || !self.unexpected_right_only.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.stale_left.is_empty()
            || !self.stale_right.is_empty()
            || !self.acronym_warnings.is_empty()
    }

    pub fn verdict(&self) -> Verdict {
        if self.has_errors() {
            Verdict::Failed
        } else if self.has_warnings() {
            Verdict::PassedWithWarnings
        } else {
            Verdict::InSync
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.verdict().exit_code()
    }

    /// Write the report
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(out, "{}", rule)?;
        writeln!(out, "Property Operator Parity Check")?;
        writeln!(out, "{}", rule)?;
        writeln!(out)?;

        let rows = [
            (format!("{} operators:", self.left_label), self.left_count),
            (format!("{} operators:", self.right_label), self.right_count),
            (format!("{}-only allowlist:", self.left_label), self.left_allowlist_count),
            (format!("{}-only allowlist:", self.right_label), self.right_allowlist_count),
        ];
        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        for (label, count) in rows {
            writeln!(out, "  {:<width$} {}", label, count, width = width)?;
        }

        let mismatches = [
            (&self.unexpected_left_only, &self.left_label, &self.right_label),
            (&self.unexpected_right_only, &self.right_label, &self.left_label),
        ];
        for (names, present, missing) in mismatches {
            if !names.is_empty() {
                writeln!(
                    out,
                    "\n  ERROR: Operators in {} but not in {} (and not in allowlist):",
                    present, missing
                )?;
                for name in names {
                    writeln!(out, "     - {}", name)?;
                }
            }
        }

        for (allowed, label) in [
            (&self.allowed_left_only, &self.left_label),
            (&self.allowed_right_only, &self.right_label),
        ] {
            if !allowed.is_empty() {
                writeln!(out, "\n  Allowlisted {}-only operators:", label)?;
                for (name, reason) in allowed {
                    writeln!(out, "     - {}: {}", name, reason)?;
                }
            }
        }

        for (stale, label) in [
            (&self.stale_left, &self.left_label),
            (&self.stale_right, &self.right_label),
        ] {
            if !stale.is_empty() {
                writeln!(
                    out,
                    "\n  WARNING: Stale entries in {0}-only allowlist (operator no longer {0}-only):",
                    label
                )?;
                for name in stale {
                    writeln!(out, "     - {}", name)?;
                }
            }
        }

        if !self.acronym_warnings.is_empty() {
            writeln!(
                out,
                "\n  WARNING: Variants with consecutive capitals (canonicalized without acronym splitting):"
            )?;
            for warning in &self.acronym_warnings {
                writeln!(
                    out,
                    "     - {} -> {} (run '{}'); check that this is its wire name",
                    warning.variant, warning.canonical, warning.run
                )?;
            }
        }

        if !self.has_errors() && self.stale_left.is_empty() && self.stale_right.is_empty() {
            writeln!(out, "\n  All gaps accounted for")?;
        }

        writeln!(out, "\n{}", rule)?;

        match self.verdict() {
            Verdict::Failed => {
                writeln!(out, "\nFAILED: Unexpected operator parity gap found.")?;
                writeln!(out, "\nTo fix, either:")?;
                writeln!(out, "  1. Add the missing operator to the other side:")?;
                writeln!(out, "     - {}: {}", self.left_label, self.schema_path.display())?;
                writeln!(out, "     - {}: {}", self.right_label, self.source_path.display())?;
                writeln!(out, "  2. Or add it to the matching allowlist in the parity config")?;
                writeln!(out, "     with a reason explaining why the gap is intentional.")?;
            }
            Verdict::PassedWithWarnings => {
                writeln!(out, "\nPASSED with warnings: Review the warnings above.")?;
                writeln!(out, "\nAll operators are in sync.")?;
            }
            Verdict::InSync => {
                writeln!(out, "\nAll operators are in sync.")?;
            }
        }

        Ok(())
    }
}

/// Split one side's gap into (unexpected, allowlisted, stale)
#[allow(clippy::type_complexity)]
fn classify(
    only: &BTreeSet<&String>,
    allowlist: &BTreeMap<String, String>,
) -> (Vec<String>, Vec<(String, String)>, Vec<String>) {
    let mut unexpected = Vec::new();
    let mut allowed = Vec::new();

    for name in only {
        match allowlist.get(name.as_str()) {
            Some(reason) => allowed.push(((*name).clone(), reason.clone())),
            None => unexpected.push((*name).clone()),
        }
    }

    let stale = allowlist
        .keys()
        .filter(|name| !only.contains(name))
        .cloned()
        .collect();

    (unexpected, allowed, stale)
}

/// Write the report for a check that could not run. Always a failure.
pub fn render_failure<W: Write>(error: &ParityError, out: &mut W) -> io::Result<()> {
    writeln!(out, "ERROR: {}", error)?;
    if error.is_parser_breakage() {
        writeln!(
            out,
            "\nFAILED: Operator extraction looks broken; this is not an operator gap."
        )?;
    } else {
        writeln!(
            out,
            "\nFAILED: Could not read operator definitions; this is not an operator gap."
        )?;
    }
    Ok(())
}

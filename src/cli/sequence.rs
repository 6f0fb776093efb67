//! Sequence command handler.
//!
//! Implements the `sequence` subcommand: diff every consecutive pair of
//! ontology versions in a directory.

use crate::compare::RdfOntologyComparator;
use crate::config::SequenceConfig;
use crate::pipeline::{self, exit_codes, SequenceOutcome};
use anyhow::{Context, Result};

/// Run the sequence command, returning the desired exit code.
#[allow(clippy::needless_pass_by_value)]
pub fn run_sequence(config: SequenceConfig) -> Result<i32> {
    let outcome = pipeline::run_sequence(&RdfOntologyComparator::new(), &config)
        .with_context(|| format!("Failed to diff versions in {}", config.base_dir.display()))?;

    if !config.behavior.quiet {
        println!("{}", format_outcome(&outcome));
    }

    if config.behavior.fail_on_change && outcome.has_changes() {
        return Ok(exit_codes::CHANGES_DETECTED);
    }
    Ok(exit_codes::SUCCESS)
}

/// One line per pair, then a total.
fn format_outcome(outcome: &SequenceOutcome) -> String {
    let mut lines: Vec<String> = outcome
        .pairs
        .iter()
        .map(|pair| {
            let mut line = format!(
                "{} → {}: {} change events",
                file_name(&pair.older),
                file_name(&pair.newer),
                pair.summary.total()
            );
            let kinds: Vec<String> = pair
                .summary
                .iter()
                .map(|(kind, count)| format!("{kind} {count}"))
                .collect();
            if !kinds.is_empty() {
                line.push_str(&format!(" ({})", kinds.join(", ")));
            }
            line
        })
        .collect();
    lines.push(format!(
        "{} versions, {} pairs, {} change events",
        outcome.versions.len(),
        outcome.pairs.len(),
        outcome.total_events()
    ));
    lines.join("\n")
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

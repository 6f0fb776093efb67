//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two ontology versions.

use crate::compare::RdfOntologyComparator;
use crate::config::{DiffConfig, DiffPaths};
use crate::pipeline::{diff_pair, exit_codes, should_use_color, write_output, OutputTarget};
use crate::render::ChangeSetRenderer;
use crate::reports::{create_reporter_with_options, ReportConfig, ReportMetadata};
use crate::serialize::GraphSerializer;
use anyhow::{Context, Result};

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;
    let DiffPaths { older, newer } = &config.paths;

    let comparator = RdfOntologyComparator::new();
    let renderer = ChangeSetRenderer::new(config.behavior.vocabulary);
    let diff = diff_pair(
        &comparator,
        &renderer,
        older,
        newer,
        &config.annotation_properties,
    )?;

    if !quiet {
        tracing::info!(
            "Compared {} classes with {} classes: {} change events",
            diff.comparison.older.class_count,
            diff.comparison.newer.class_count,
            diff.rendered.summary.total()
        );
    }

    if let Some(path) = &config.graph_file {
        GraphSerializer::new(config.output.graph_format)
            .write_file(&diff.rendered.graph, path)
            .with_context(|| format!("Failed to write diff graph to {}", path.display()))?;
        if !quiet {
            tracing::info!("Diff graph written to {}", path.display());
        }
    }

    let target = OutputTarget::Stdout;
    let reporter = create_reporter_with_options(
        config.output.report_format,
        should_use_color(config.output.no_color, &target),
    );
    let report_config = ReportConfig {
        max_items: None,
        metadata: ReportMetadata::new(),
    };
    let report = reporter
        .generate(&diff.comparison, &report_config)
        .context("Failed to generate report")?;
    write_output(&report, &target, quiet)?;

    Ok(determine_exit_code(&config, diff.has_changes()))
}

/// Determine the appropriate exit code based on diff results and config flags.
pub(crate) const fn determine_exit_code(config: &DiffConfig, has_changes: bool) -> i32 {
    if config.behavior.fail_on_change && has_changes {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}

//! Per-pair stage: compare → render → serialize (→ text report).
//!
//! Nothing is written for a pair until its graph and report have been rendered.
//! The graph is written atomically and removed again if the report cannot be
//! written, so a failed pair leaves no artifact.

use super::discover::{artifact_name, report_name};
use crate::compare::{Comparison, OntologyComparator};
use crate::config::SequenceConfig;
use crate::error::{ErrorContext, OntoDiffError, Result};
use crate::model::Iri;
use crate::render::{ChangeSetRenderer, RenderSummary, RenderedDiff};
use crate::reports::{ReportConfig, ReportGenerator, ReportMetadata, TextReporter};
use crate::serialize::GraphSerializer;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A compared and rendered version pair, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct PairDiff {
    pub comparison: Comparison,
    pub rendered: RenderedDiff,
}

impl PairDiff {
    /// Whether the comparison found any class-level change.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.comparison.changes.is_empty()
    }
}

/// What one pair of a sequence run produced.
#[derive(Debug, Clone)]
pub struct PairOutcome {
    pub older: PathBuf,
    pub newer: PathBuf,
    /// The diff graph artifact
    pub graph_path: PathBuf,
    /// The text report, when requested
    pub report_path: Option<PathBuf>,
    pub summary: RenderSummary,
    /// Relations skipped because they did not mention their class
    pub inconsistencies: usize,
    pub has_changes: bool,
}

/// Compare two documents and render the resulting change set.
///
/// # Errors
///
/// Fails with [`OntoDiffError::Load`] when either document cannot be loaded
/// and with [`OntoDiffError::Render`] when the change set cannot be rendered.
pub fn diff_pair(
    comparator: &dyn OntologyComparator,
    renderer: &ChangeSetRenderer,
    older: &Path,
    newer: &Path,
    annotation_properties: &[Iri],
) -> Result<PairDiff> {
    let comparison = comparator
        .compare(older, newer, annotation_properties)
        .with_context(|| format!("comparing {} with {}", older.display(), newer.display()))?;

    let rendered = renderer
        .render(
            &comparison.changes,
            &comparison.older.version,
            &comparison.newer.version,
        )
        .with_context(|| {
            format!(
                "rendering {} → {}",
                comparison.older.version, comparison.newer.version
            )
        })?;

    debug!(
        events = rendered.summary.total(),
        statements = rendered.graph.len(),
        "pair rendered"
    );
    Ok(PairDiff {
        comparison,
        rendered,
    })
}

/// Run the full stage for one pair of a sequence.
///
/// # Errors
///
/// Returns the first load, render, serialization or report error. The graph
/// artifact is only present on disk if serialization succeeded.
pub fn run_pair(
    comparator: &dyn OntologyComparator,
    renderer: &ChangeSetRenderer,
    older: &Path,
    newer: &Path,
    config: &SequenceConfig,
) -> Result<PairOutcome> {
    let diff = diff_pair(
        comparator,
        renderer,
        older,
        newer,
        &config.annotation_properties,
    )?;

    let report = if config.output.text_report {
        Some(render_text_report(&diff.comparison)?)
    } else {
        None
    };

    let out_dir = config.artifact_dir();
    let format = config.output.graph_format;
    let graph_path = out_dir.join(artifact_name(older, newer, format));
    GraphSerializer::new(format)
        .write_file(&diff.rendered.graph, &graph_path)
        .context("writing diff graph")?;
    info!(path = %graph_path.display(), %format, "diff graph written");

    let report_path = match report {
        Some(report) => {
            let path = out_dir.join(report_name(older, newer));
            if let Err(e) = std::fs::write(&path, report) {
                if let Err(cleanup) = std::fs::remove_file(&graph_path) {
                    warn!(path = %graph_path.display(), "could not remove diff graph: {cleanup}");
                }
                return Err(OntoDiffError::io(path, e));
            }
            info!(path = %path.display(), "text report written");
            Some(path)
        }
        None => None,
    };

    Ok(PairOutcome {
        older: older.to_path_buf(),
        newer: newer.to_path_buf(),
        graph_path,
        report_path,
        has_changes: diff.has_changes(),
        inconsistencies: diff.rendered.inconsistencies.len(),
        summary: diff.rendered.summary,
    })
}

fn render_text_report(comparison: &Comparison) -> Result<String> {
    let config = ReportConfig {
        max_items: None,
        metadata: ReportMetadata::new(),
    };
    TextReporter::new()
        .generate(comparison, &config)
        .context("generating text report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{LoadErrorKind, OntologyInfo, OntologyLoadError};
    use crate::config::AppConfig;
    use crate::model::{ChangeSet, VersionId, VersionSide};
    use tempfile::TempDir;

    /// Returns a fixed change set for any pair.
    struct FixedComparator(ChangeSet);

    impl OntologyComparator for FixedComparator {
        fn compare(
            &self,
            older: &Path,
            newer: &Path,
            _annotation_properties: &[Iri],
        ) -> std::result::Result<Comparison, OntologyLoadError> {
            let info = |path: &Path, version: &str| OntologyInfo {
                location: path.to_path_buf(),
                version: VersionId::parse(version).unwrap(),
                class_count: 1,
            };
            Ok(Comparison {
                older: info(older, "http://example.org/onto/v1"),
                newer: info(newer, "http://example.org/onto/v2"),
                changes: self.0.clone(),
            })
        }
    }

    struct FailingComparator;

    impl OntologyComparator for FailingComparator {
        fn compare(
            &self,
            _older: &Path,
            newer: &Path,
            _annotation_properties: &[Iri],
        ) -> std::result::Result<Comparison, OntologyLoadError> {
            Err(OntologyLoadError::new(
                VersionSide::Newer,
                newer,
                LoadErrorKind::MissingVersion,
            ))
        }
    }

    fn foo() -> Iri {
        Iri::new("http://example.org/onto#Foo").unwrap()
    }

    fn sequence_config(dir: &Path, text_report: bool) -> SequenceConfig {
        AppConfig::builder()
            .text_report(text_report)
            .build()
            .sequence_config(dir.to_path_buf())
            .unwrap()
    }

    #[test]
    fn test_run_pair_writes_graph_and_report() {
        let tmp = TempDir::new().unwrap();
        let comparator = FixedComparator(ChangeSet::new().with_new_class(foo()));
        let outcome = run_pair(
            &comparator,
            &ChangeSetRenderer::default(),
            &tmp.path().join("v1.owl"),
            &tmp.path().join("v2.owl"),
            &sequence_config(tmp.path(), true),
        )
        .unwrap();

        assert_eq!(outcome.graph_path, tmp.path().join("v1.owl-v2.owl.trig"));
        assert!(outcome.graph_path.exists());
        let report_path = outcome.report_path.unwrap();
        assert_eq!(report_path, tmp.path().join("v1.owl-v2.owl.txt"));
        let report = std::fs::read_to_string(report_path).unwrap();
        assert!(report.contains("Number of classes added: 1"));
        assert!(outcome.has_changes);
        assert_eq!(outcome.summary.total(), 1);
    }

    #[test]
    fn test_run_pair_without_changes() {
        let tmp = TempDir::new().unwrap();
        let outcome = run_pair(
            &FixedComparator(ChangeSet::new()),
            &ChangeSetRenderer::default(),
            &tmp.path().join("a.owl"),
            &tmp.path().join("b.owl"),
            &sequence_config(tmp.path(), false),
        )
        .unwrap();
        assert!(!outcome.has_changes);
        assert!(outcome.report_path.is_none());
        assert!(outcome.graph_path.exists());
    }

    #[test]
    fn test_load_failure_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let err = run_pair(
            &FailingComparator,
            &ChangeSetRenderer::default(),
            &tmp.path().join("v1.owl"),
            &tmp.path().join("v2.owl"),
            &sequence_config(tmp.path(), true),
        )
        .unwrap_err();

        assert_eq!(err.failed_side(), Some(VersionSide::Newer));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_report_write_failure_removes_graph() {
        let tmp = TempDir::new().unwrap();
        // a directory in the way makes the report unwritable
        std::fs::create_dir(tmp.path().join("v1.owl-v2.owl.txt")).unwrap();
        let comparator = FixedComparator(ChangeSet::new().with_new_class(foo()));

        let result = run_pair(
            &comparator,
            &ChangeSetRenderer::default(),
            &tmp.path().join("v1.owl"),
            &tmp.path().join("v2.owl"),
            &sequence_config(tmp.path(), true),
        );

        assert!(result.is_err());
        assert!(!tmp.path().join("v1.owl-v2.owl.trig").exists());
    }
}

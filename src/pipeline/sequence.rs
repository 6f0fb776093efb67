//! Sequential diffing of a whole version directory.

use super::discover::{discover_versions, version_pairs};
use super::pair_stage::{run_pair, PairOutcome};
use super::PipelineError;
use crate::compare::OntologyComparator;
use crate::config::SequenceConfig;
use crate::render::ChangeSetRenderer;
use std::path::PathBuf;
use tracing::{info, warn};

/// Everything a completed run produced, pair by pair in sequence order.
#[derive(Debug, Clone)]
pub struct SequenceOutcome {
    pub versions: Vec<PathBuf>,
    pub pairs: Vec<PairOutcome>,
}

impl SequenceOutcome {
    /// Whether any pair of the run had changes.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.pairs.iter().any(|pair| pair.has_changes)
    }

    /// Total change events rendered over all pairs.
    #[must_use]
    pub fn total_events(&self) -> usize {
        self.pairs.iter().map(|pair| pair.summary.total()).sum()
    }
}

/// Discover the versions under `config.base_dir` and diff them pairwise.
///
/// Pairs run strictly in order, each newer version becoming the older side
/// of the next pair. The first failing pair aborts the run; artifacts of the
/// pairs before it stay in place.
///
/// # Errors
///
/// - [`PipelineError::Discovery`] if the base directory cannot be listed
/// - [`PipelineError::NotEnoughVersions`] if fewer than two versions match
/// - [`PipelineError::OutputDir`] if the artifact directory cannot be created
/// - [`PipelineError::Pair`] for the first pair that fails
pub fn run_sequence(
    comparator: &dyn OntologyComparator,
    config: &SequenceConfig,
) -> Result<SequenceOutcome, PipelineError> {
    let versions = discover_versions(&config.base_dir, &config.discovery)?;
    if versions.len() < 2 {
        return Err(PipelineError::NotEnoughVersions {
            dir: config.base_dir.clone(),
            found: versions.len(),
        });
    }

    let out_dir = config.artifact_dir();
    std::fs::create_dir_all(&out_dir).map_err(|source| PipelineError::OutputDir {
        dir: out_dir.clone(),
        source,
    })?;

    let renderer = ChangeSetRenderer::new(config.behavior.vocabulary);
    let pairs = version_pairs(&versions);
    let total = pairs.len();
    info!(
        dir = %config.base_dir.display(),
        versions = versions.len(),
        pairs = total,
        "starting version sequence"
    );

    let mut outcomes = Vec::with_capacity(total);
    for (index, (older, newer)) in pairs.into_iter().enumerate() {
        info!(
            "[{}/{}] {} → {}",
            index + 1,
            total,
            older.display(),
            newer.display()
        );
        let outcome =
            run_pair(comparator, &renderer, older, newer, config).map_err(|source| {
                PipelineError::Pair {
                    older: older.to_path_buf(),
                    newer: newer.to_path_buf(),
                    source,
                }
            })?;
        if outcome.inconsistencies > 0 {
            warn!(
                skipped = outcome.inconsistencies,
                "structural inconsistencies skipped in {}",
                outcome.graph_path.display()
            );
        }
        outcomes.push(outcome);
    }

    Ok(SequenceOutcome {
        versions,
        pairs: outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{Comparison, LoadErrorKind, OntologyInfo, OntologyLoadError};
    use crate::config::AppConfig;
    use crate::model::{ChangeSet, Iri, VersionId, VersionSide};
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records the pairs it is asked to compare; fails on `fail_on`.
    #[derive(Default)]
    struct RecordingComparator {
        calls: Mutex<Vec<(String, String)>>,
        fail_on: Option<&'static str>,
    }

    fn name(path: &Path) -> String {
        path.file_name().unwrap().to_string_lossy().into_owned()
    }

    impl OntologyComparator for RecordingComparator {
        fn compare(
            &self,
            older: &Path,
            newer: &Path,
            _annotation_properties: &[Iri],
        ) -> Result<Comparison, OntologyLoadError> {
            self.calls
                .lock()
                .unwrap()
                .push((name(older), name(newer)));
            if self.fail_on == Some(name(newer).as_str()) {
                return Err(OntologyLoadError::new(
                    VersionSide::Newer,
                    newer,
                    LoadErrorKind::Parse("unexpected token".to_string()),
                ));
            }
            let info = |path: &Path| OntologyInfo {
                location: path.to_path_buf(),
                version: VersionId::parse(&format!("http://example.org/{}", name(path)))
                    .unwrap(),
                class_count: 0,
            };
            Ok(Comparison {
                older: info(older),
                newer: info(newer),
                changes: ChangeSet::new(),
            })
        }
    }

    fn setup(names: &[&str]) -> (TempDir, SequenceConfig) {
        let tmp = TempDir::new().unwrap();
        for name in names {
            std::fs::write(tmp.path().join(name), "").unwrap();
        }
        let config = AppConfig::default()
            .sequence_config(tmp.path().to_path_buf())
            .unwrap();
        (tmp, config)
    }

    #[test]
    fn test_pairs_run_in_order() {
        let (tmp, config) = setup(&["v2.owl", "v3.owl", "v1.owl"]);
        let comparator = RecordingComparator::default();

        let outcome = run_sequence(&comparator, &config).unwrap();

        let calls = comparator.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            [
                ("v1.owl".to_string(), "v2.owl".to_string()),
                ("v2.owl".to_string(), "v3.owl".to_string()),
            ]
        );
        assert_eq!(outcome.pairs.len(), 2);
        assert!(tmp.path().join("v1.owl-v2.owl.trig").exists());
        assert!(tmp.path().join("v2.owl-v3.owl.trig").exists());
        assert!(!outcome.has_changes());
    }

    #[test]
    fn test_first_failure_aborts_run() {
        let (tmp, config) = setup(&["v1.owl", "v2.owl", "v3.owl", "v4.owl"]);
        let comparator = RecordingComparator {
            fail_on: Some("v3.owl"),
            ..Default::default()
        };

        let err = run_sequence(&comparator, &config).unwrap_err();

        match err {
            PipelineError::Pair { older, newer, source } => {
                assert_eq!(name(&older), "v2.owl");
                assert_eq!(name(&newer), "v3.owl");
                assert_eq!(source.failed_side(), Some(VersionSide::Newer));
            }
            other => panic!("expected pair error, got {other:?}"),
        }
        assert_eq!(comparator.calls.lock().unwrap().len(), 2);
        assert!(tmp.path().join("v1.owl-v2.owl.trig").exists());
        assert!(!tmp.path().join("v2.owl-v3.owl.trig").exists());
        assert!(!tmp.path().join("v3.owl-v4.owl.trig").exists());
    }

    #[test]
    fn test_not_enough_versions() {
        let (_tmp, config) = setup(&["only.owl", "notes.txt"]);
        let err = run_sequence(&RecordingComparator::default(), &config).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::NotEnoughVersions { found: 1, .. }
        ));
    }

    #[test]
    fn test_output_dir_is_created() {
        let (tmp, mut config) = setup(&["a.owl", "b.owl"]);
        let out = tmp.path().join("diffs");
        config.output.output_dir = Some(out.clone());

        run_sequence(&RecordingComparator::default(), &config).unwrap();

        assert!(out.join("a.owl-b.owl.trig").exists());
        assert!(!tmp.path().join("a.owl-b.owl.trig").exists());
    }
}

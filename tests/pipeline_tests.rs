//! Pipeline integration tests.
//!
//! These tests run the discover → compare → render → serialize pipeline over
//! real fixture ontologies and read the written diff graphs back.

use ontodiff::config::AppConfig;
use ontodiff::pipeline::{discover_versions, run_sequence, PipelineError};
use ontodiff::{GraphFormat, RdfOntologyComparator, SequenceConfig, VersionSide};
use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::Quad;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn sequence_config(base_dir: PathBuf, out: &TempDir, app: AppConfig) -> SequenceConfig {
    let mut config = app.sequence_config(base_dir).expect("valid config");
    config.output.output_dir = Some(out.path().to_path_buf());
    config
}

fn read_quads(path: &Path, format: RdfFormat) -> Vec<Quad> {
    let file = std::fs::File::open(path).expect("artifact exists");
    RdfParser::from_format(format)
        .for_reader(file)
        .collect::<Result<_, _>>()
        .expect("artifact parses")
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ============================================================================
// Discovery
// ============================================================================

mod discovery {
    use super::*;

    #[test]
    fn discovers_owl_versions_in_name_order() {
        let config = AppConfig::default();
        let versions =
            discover_versions(&fixture_path("sequence"), &config.discovery).unwrap();
        let names: Vec<_> = versions
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["top_2023.owl", "top_2024.owl", "top_2025.owl"]);
    }

    #[test]
    fn extension_filter_selects_other_syntaxes() {
        let config = AppConfig::builder().extension(".ttl").build();
        let versions =
            discover_versions(&fixture_path("sequence"), &config.discovery).unwrap();
        assert_eq!(versions.len(), 1);
        assert!(versions[0].ends_with("draft_2026.ttl"));
    }
}

// ============================================================================
// Sequence runs
// ============================================================================

mod sequence {
    use super::*;

    #[test]
    fn writes_one_artifact_per_pair() {
        let out = TempDir::new().unwrap();
        let config = sequence_config(fixture_path("sequence"), &out, AppConfig::default());

        let outcome = run_sequence(&RdfOntologyComparator::new(), &config).unwrap();

        assert_eq!(outcome.versions.len(), 3);
        assert_eq!(outcome.pairs.len(), 2);
        assert_eq!(
            file_names(out.path()),
            ["top_2023.owl-top_2024.owl.trig", "top_2024.owl-top_2025.owl.trig"]
        );
        assert!(outcome.has_changes());
        // Angina added; HeartDisease gains a sub-term and a new label
        assert_eq!(outcome.pairs[0].summary.total(), 4);
        // Infarction deleted; HeartDisease loses it as a sub-term
        assert_eq!(outcome.pairs[1].summary.total(), 2);
        assert_eq!(outcome.total_events(), 6);
    }

    #[test]
    fn artifacts_are_valid_trig_with_one_successor_link() {
        let out = TempDir::new().unwrap();
        let config = sequence_config(fixture_path("sequence"), &out, AppConfig::default());
        let outcome = run_sequence(&RdfOntologyComparator::new(), &config).unwrap();

        let quads = read_quads(&outcome.pairs[0].graph_path, RdfFormat::TriG);
        let default_graph: Vec<&Quad> =
            quads.iter().filter(|q| q.graph_name.is_default_graph()).collect();
        assert_eq!(default_graph.len(), 1);
        assert_eq!(
            default_graph[0].subject.to_string(),
            "<http://example.org/top/2023#>"
        );
        assert_eq!(
            default_graph[0].object.to_string(),
            "<http://example.org/top/2024#>"
        );
        assert!(quads
            .iter()
            .filter(|q| !q.graph_name.is_default_graph())
            .all(|q| q.graph_name.to_string() == "<http://example.org/top/2024#>"));

        let text = std::fs::read_to_string(&outcome.pairs[0].graph_path).unwrap();
        assert!(text.contains("@prefix v: <https://top.smith.care/terminology/changes#>"));
    }

    #[test]
    fn nquads_and_text_reports() {
        let out = TempDir::new().unwrap();
        let app = AppConfig::builder()
            .graph_format(GraphFormat::NQuads)
            .text_report(true)
            .build();
        let config = sequence_config(fixture_path("sequence"), &out, app);

        let outcome = run_sequence(&RdfOntologyComparator::new(), &config).unwrap();

        assert_eq!(
            file_names(out.path()),
            [
                "top_2023.owl-top_2024.owl.nq",
                "top_2023.owl-top_2024.owl.txt",
                "top_2024.owl-top_2025.owl.nq",
                "top_2024.owl-top_2025.owl.txt",
            ]
        );
        let quads = read_quads(&outcome.pairs[1].graph_path, RdfFormat::NQuads);
        assert!(!quads.is_empty());

        let report = std::fs::read_to_string(outcome.pairs[1].report_path.as_ref().unwrap())
            .unwrap();
        assert!(report.starts_with("Ontology Diff Summary\n"));
        assert!(report.contains("Number of classes deleted: 1"));
        assert!(report.contains("Class: http://example.org/top#Infarction\nLabel(s): Infarction"));
    }

    #[test]
    fn load_failure_aborts_and_keeps_earlier_artifacts() {
        let base = TempDir::new().unwrap();
        std::fs::copy(
            fixture_path("sequence/top_2023.owl"),
            base.path().join("top_2023.owl"),
        )
        .unwrap();
        std::fs::copy(
            fixture_path("sequence/top_2024.owl"),
            base.path().join("top_2024.owl"),
        )
        .unwrap();
        std::fs::copy(
            fixture_path("invalid/broken.owl"),
            base.path().join("top_2025.owl"),
        )
        .unwrap();
        std::fs::copy(
            fixture_path("sequence/top_2025.owl"),
            base.path().join("top_2026.owl"),
        )
        .unwrap();
        let out = TempDir::new().unwrap();
        let config = sequence_config(base.path().to_path_buf(), &out, AppConfig::default());

        let err = run_sequence(&RdfOntologyComparator::new(), &config).unwrap_err();

        match err {
            PipelineError::Pair { older, newer, source } => {
                assert!(older.ends_with("top_2024.owl"));
                assert!(newer.ends_with("top_2025.owl"));
                assert_eq!(source.failed_side(), Some(VersionSide::Newer));
            }
            other => panic!("expected a pair failure, got {other:?}"),
        }
        assert_eq!(file_names(out.path()), ["top_2023.owl-top_2024.owl.trig"]);
    }

    #[test]
    fn single_version_is_an_error() {
        let out = TempDir::new().unwrap();
        let app = AppConfig::builder().extension(".ttl").build();
        let config = sequence_config(fixture_path("sequence"), &out, app);

        let err = run_sequence(&RdfOntologyComparator::new(), &config).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::NotEnoughVersions { found: 1, .. }
        ));
        assert!(file_names(out.path()).is_empty());
    }
}

//! Configuration types for ontodiff operations.
//!
//! [`AppConfig`] is the file-level configuration. [`SequenceConfig`] and
//! [`DiffConfig`] are the resolved, per-command forms the pipeline consumes.

use super::validation::ConfigError;
use crate::model::Iri;
use crate::reports::ReportFormat;
use crate::serialize::GraphFormat;
use crate::vocab::well_known::DEFAULT_ANNOTATION_PROPERTIES;
use crate::vocab::VocabularyVersion;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// Command-line flags are applied over file values, see
/// [`AppConfig::from_file_with_overrides`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Which files in a directory count as ontology versions
    pub discovery: DiscoveryConfig,
    /// What the comparison engine looks at
    pub comparison: ComparisonConfig,
    /// Artifact and report output
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Resolve this configuration into the inputs of a `sequence` run.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a configured annotation property is not
    /// a valid IRI.
    pub fn sequence_config(&self, base_dir: PathBuf) -> Result<SequenceConfig, ConfigError> {
        Ok(SequenceConfig {
            base_dir,
            discovery: self.discovery.clone(),
            annotation_properties: self.comparison.annotation_iris()?,
            output: self.output.clone(),
            behavior: self.behavior.clone(),
        })
    }

    /// Resolve this configuration into the inputs of a single-pair `diff`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a configured annotation property is not
    /// a valid IRI.
    pub fn diff_config(
        &self,
        older: PathBuf,
        newer: PathBuf,
        graph_file: Option<PathBuf>,
    ) -> Result<DiffConfig, ConfigError> {
        Ok(DiffConfig {
            paths: DiffPaths { older, newer },
            graph_file,
            annotation_properties: self.comparison.annotation_iris()?,
            output: self.output.clone(),
            behavior: self.behavior.clone(),
        })
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the file extension that marks ontology versions.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.config.discovery.extension = extension.into();
        self
    }

    /// Only consider files whose name starts with `prefix`.
    pub fn prefix(mut self, prefix: Option<String>) -> Self {
        self.config.discovery.prefix = prefix;
        self
    }

    /// Replace the annotation properties the comparison reports on.
    pub fn annotation_properties(mut self, properties: Vec<String>) -> Self {
        self.config.comparison.annotation_properties = properties;
        self
    }

    /// Set the quad serialization format.
    pub const fn graph_format(mut self, format: GraphFormat) -> Self {
        self.config.output.graph_format = format;
        self
    }

    /// Write a text report next to each graph artifact.
    pub const fn text_report(mut self, enabled: bool) -> Self {
        self.config.output.text_report = enabled;
        self
    }

    /// Write artifacts to `dir` instead of the base directory.
    pub fn output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.config.output.output_dir = dir;
        self
    }

    /// Set the console report format.
    pub const fn report_format(mut self, format: ReportFormat) -> Self {
        self.config.output.report_format = format;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Select the vocabulary namespace the renderer writes.
    pub const fn vocabulary(mut self, vocabulary: VocabularyVersion) -> Self {
        self.config.behavior.vocabulary = vocabulary;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Version discovery settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// File name suffix of ontology versions, e.g. ".owl"
    pub extension: String,
    /// Optional file name prefix filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extension: ".owl".to_string(),
            prefix: None,
        }
    }
}

impl DiscoveryConfig {
    /// Whether a file name belongs to the version sequence.
    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.extension)
            && self
                .prefix
                .as_deref()
                .map_or(true, |prefix| file_name.starts_with(prefix))
    }
}

/// Comparison engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Annotation properties whose values are compared (IRIs)
    pub annotation_properties: Vec<String>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            annotation_properties: DEFAULT_ANNOTATION_PROPERTIES
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
        }
    }
}

impl ComparisonConfig {
    /// Parse the configured annotation properties.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for the first entry that is not a valid IRI.
    pub fn annotation_iris(&self) -> Result<Vec<Iri>, ConfigError> {
        self.annotation_properties
            .iter()
            .map(|p| {
                Iri::new(p.as_str()).map_err(|e| ConfigError {
                    field: "comparison.annotation_properties".to_string(),
                    message: e.to_string(),
                })
            })
            .collect()
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Quad serialization format of the diff graph
    pub graph_format: GraphFormat,
    /// Also write a plain-text report per version pair
    pub text_report: bool,
    /// Directory for artifacts (defaults to the base directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Console report format
    pub report_format: ReportFormat,
    /// Disable colored output
    pub no_color: bool,
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any pair has changes
    pub fail_on_change: bool,
    /// Suppress non-essential output
    pub quiet: bool,
    /// Vocabulary namespace for rendered terms
    pub vocabulary: VocabularyVersion,
}

// ============================================================================
// Command-specific Configuration Types
// ============================================================================

/// Configuration for a `sequence` run over a directory of versions
#[derive(Debug, Clone)]
pub struct SequenceConfig {
    /// Directory holding the ontology versions
    pub base_dir: PathBuf,
    /// Version discovery settings
    pub discovery: DiscoveryConfig,
    /// Parsed annotation properties
    pub annotation_properties: Vec<Iri>,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl SequenceConfig {
    /// Where artifacts are written.
    #[must_use]
    pub fn artifact_dir(&self) -> PathBuf {
        self.output
            .output_dir
            .clone()
            .unwrap_or_else(|| self.base_dir.clone())
    }
}

/// Paths for diff operation
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Path to the older ontology version
    pub older: PathBuf,
    /// Path to the newer ontology version
    pub newer: PathBuf,
}

/// Configuration for a single-pair `diff`
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Paths to compare
    pub paths: DiffPaths,
    /// Where to write the diff graph (None to skip)
    pub graph_file: Option<PathBuf>,
    /// Parsed annotation properties
    pub annotation_properties: Vec<Iri>,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_annotation_properties_parse() {
        let iris = ComparisonConfig::default().annotation_iris().unwrap();
        assert_eq!(iris.len(), 3);
        assert_eq!(
            iris[0].as_str(),
            "http://www.w3.org/2000/01/rdf-schema#label"
        );
    }

    #[test]
    fn test_invalid_annotation_property() {
        let config = ComparisonConfig {
            annotation_properties: vec!["not an iri".to_string()],
        };
        let err = config.annotation_iris().unwrap_err();
        assert_eq!(err.field, "comparison.annotation_properties");
    }

    #[test]
    fn test_discovery_matches() {
        let mut discovery = DiscoveryConfig::default();
        assert!(discovery.matches("v1.owl"));
        assert!(!discovery.matches("v1.ttl"));

        discovery.prefix = Some("top_".to_string());
        assert!(discovery.matches("top_2024.owl"));
        assert!(!discovery.matches("other_2024.owl"));
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .extension(".ttl")
            .graph_format(GraphFormat::NQuads)
            .text_report(true)
            .fail_on_change(true)
            .vocabulary(VocabularyVersion::Legacy)
            .build();
        assert_eq!(config.discovery.extension, ".ttl");
        assert_eq!(config.output.graph_format, GraphFormat::NQuads);
        assert!(config.output.text_report);
        assert!(config.behavior.fail_on_change);
        assert_eq!(config.behavior.vocabulary, VocabularyVersion::Legacy);
    }

    #[test]
    fn test_artifact_dir_defaults_to_base_dir() {
        let app = AppConfig::default();
        let seq = app.sequence_config(PathBuf::from("onto")).unwrap();
        assert_eq!(seq.artifact_dir(), PathBuf::from("onto"));

        let app = AppConfig::builder()
            .output_dir(Some(PathBuf::from("out")))
            .build();
        let seq = app.sequence_config(PathBuf::from("onto")).unwrap();
        assert_eq!(seq.artifact_dir(), PathBuf::from("out"));
    }
}

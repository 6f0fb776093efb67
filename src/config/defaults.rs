//! Default configurations and presets for ontodiff.
//!
//! Provides named presets for common use cases and default values.

use super::types::{AppConfig, BehaviorConfig, OutputConfig};
use crate::reports::ReportFormat;
use crate::serialize::GraphFormat;
use crate::vocab::VocabularyVersion;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// TriG artifacts, summary on the console
    Default,
    /// CI/CD: machine-readable output, fail on changes
    CiCd,
    /// Full release record: TriG artifacts plus a text report per pair
    Release,
    /// Output readable by consumers of the superseded vocabulary namespace
    Legacy,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::CiCd => "ci-cd",
            Self::Release => "release",
            Self::Legacy => "legacy",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "ci-cd" | "ci" | "pipeline" => Some(Self::CiCd),
            "release" | "archive" => Some(Self::Release),
            "legacy" | "versioning" => Some(Self::Legacy),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "TriG diff graphs with a console summary",
            Self::CiCd => "N-Quads graphs, JSON reports, exit code 1 on any change",
            Self::Release => "TriG diff graphs with a plain-text report for every pair",
            Self::Legacy => "Diff graphs in the deprecated versioning# namespace",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::CiCd, Self::Release, Self::Legacy]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::CiCd => Self::ci_cd_preset(),
            ConfigPreset::Release => Self::release_preset(),
            ConfigPreset::Legacy => Self::legacy_preset(),
        }
    }

    /// CI/CD pipeline preset.
    ///
    /// - N-Quads output for line-oriented tooling
    /// - JSON reports for machine parsing
    /// - Fail on any changes
    #[must_use]
    pub fn ci_cd_preset() -> Self {
        Self {
            output: OutputConfig {
                graph_format: GraphFormat::NQuads,
                report_format: ReportFormat::Json,
                no_color: true,
                ..OutputConfig::default()
            },
            behavior: BehaviorConfig {
                fail_on_change: true,
                quiet: true,
                vocabulary: VocabularyVersion::Current,
            },
            ..Self::default()
        }
    }

    /// Release preset: every pair gets a text report next to its graph.
    #[must_use]
    pub fn release_preset() -> Self {
        Self {
            output: OutputConfig {
                graph_format: GraphFormat::TriG,
                text_report: true,
                report_format: ReportFormat::Text,
                ..OutputConfig::default()
            },
            ..Self::default()
        }
    }

    /// Legacy preset: terms are written into the deprecated namespace.
    #[must_use]
    pub fn legacy_preset() -> Self {
        Self {
            behavior: BehaviorConfig {
                vocabulary: VocabularyVersion::Legacy,
                ..BehaviorConfig::default()
            },
            ..Self::default()
        }
    }
}

// ============================================================================
// Default Value Constants
// ============================================================================

/// Default file extension of ontology versions.
pub const DEFAULT_EXTENSION: &str = ".owl";

// ============================================================================
// Tests
// ============================================================================

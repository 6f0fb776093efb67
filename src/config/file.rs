//! Configuration file loading and discovery.
//!
//! Configuration is layered: preset (or defaults), then the YAML file, then
//! [`ConfigOverrides`] from the command line. The file is merged key by key
//! onto the preset, so any value it names wins, default-valued or not.

use super::defaults::ConfigPreset;
use super::types::AppConfig;
use crate::reports::ReportFormat;
use crate::serialize::GraphFormat;
use crate::vocab::VocabularyVersion;
use serde_yaml::Value;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".ontodiff.yaml",
    ".ontodiff.yml",
    "ontodiff.yaml",
    "ontodiff.yml",
];

/// Locate the config file to use.
///
/// An explicit path is returned as given, whether or not it exists. Otherwise
/// the search order is:
/// 1. Current directory
/// 2. Git repository root (if in a repo)
/// 3. User config directory (~/.config/ontodiff/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    let cwd = std::env::current_dir().ok();
    let candidates = [
        cwd.clone(),
        cwd.as_deref().and_then(find_git_root),
        dirs::config_dir().map(|dir| dir.join("ontodiff")),
        dirs::home_dir(),
    ];
    candidates
        .iter()
        .flatten()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up from `start`.
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// File not found
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error reading file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file, on top of the defaults.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    load_config_file_over(&AppConfig::default(), path)
}

/// Load a YAML file on top of `base`: keys present in the file replace the
/// corresponding values of `base`, everything else is kept.
pub fn load_config_file_over(base: &AppConfig, path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(base.clone());
    }
    let file: Value = serde_yaml::from_str(&content)?;
    let mut layered = serde_yaml::to_value(base)?;
    // A document of only comments is null
    if !file.is_null() {
        overlay(&mut layered, file);
    }
    Ok(serde_yaml::from_value(layered)?)
}

/// Deep-merge `top` into `base`, mapping by mapping.
fn overlay(base: &mut Value, top: Value) {
    match (base, top) {
        (Value::Mapping(base), Value::Mapping(top)) => {
            for (key, value) in top {
                match base.get_mut(&key) {
                    Some(existing) => overlay(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, top) => *base = top,
    }
}

/// Load the config file on top of `base`.
///
/// An explicitly requested file must exist and parse. A discovered file that
/// fails to load is skipped with a warning.
pub fn load_layered(
    base: AppConfig,
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit_path {
        let config = load_config_file_over(&base, path)?;
        return Ok((config, Some(path.to_path_buf())));
    }

    match discover_config_file(None) {
        Some(path) => match load_config_file_over(&base, &path) {
            Ok(config) => Ok((config, Some(path))),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Ok((base, None))
            }
        },
        None => Ok((base, None)),
    }
}

/// Load config from the requested or discovered file, or return defaults.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    load_layered(AppConfig::default(), explicit_path)
}

// ============================================================================
// Command-line Overrides
// ============================================================================

/// Settings given on the command line.
///
/// `None` means the flag was not given, so the preset or file value stays.
/// Boolean switches can only turn a setting on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct ConfigOverrides {
    pub extension: Option<String>,
    pub prefix: Option<String>,
    pub annotation_properties: Option<Vec<String>>,
    pub graph_format: Option<GraphFormat>,
    pub text_report: bool,
    pub output_dir: Option<PathBuf>,
    pub report_format: Option<ReportFormat>,
    pub no_color: bool,
    pub fail_on_change: bool,
    pub quiet: bool,
    pub vocabulary: Option<VocabularyVersion>,
}

impl ConfigOverrides {
    /// Write every given setting into `config`.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(extension) = &self.extension {
            config.discovery.extension.clone_from(extension);
        }
        if self.prefix.is_some() {
            config.discovery.prefix.clone_from(&self.prefix);
        }
        if let Some(properties) = &self.annotation_properties {
            config.comparison.annotation_properties.clone_from(properties);
        }

        if let Some(format) = self.graph_format {
            config.output.graph_format = format;
        }
        if let Some(format) = self.report_format {
            config.output.report_format = format;
        }
        if self.output_dir.is_some() {
            config.output.output_dir.clone_from(&self.output_dir);
        }
        config.output.text_report |= self.text_report;
        config.output.no_color |= self.no_color;

        config.behavior.fail_on_change |= self.fail_on_change;
        config.behavior.quiet |= self.quiet;
        if let Some(vocabulary) = self.vocabulary {
            config.behavior.vocabulary = vocabulary;
        }
    }
}

impl AppConfig {
    /// Layer preset (or defaults), config file and command-line overrides.
    pub fn from_file_with_overrides(
        preset: Option<ConfigPreset>,
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<(Self, Option<PathBuf>), ConfigFileError> {
        let base = preset.map_or_else(Self::default, Self::from_preset);
        let (mut config, loaded_from) = load_layered(base, config_path)?;
        overrides.apply(&mut config);
        Ok((config, loaded_from))
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# ontodiff configuration
# Place this file at .ontodiff.yaml in your project root or ~/.config/ontodiff/
# CLI arguments always override file settings.

{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

// ============================================================================
// Tests
// ============================================================================

//! Configuration module for ontodiff.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - Layering of preset, config file and command-line overrides
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ontodiff::config::{AppConfig, ConfigPreset};
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ConfigPreset::CiCd);
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .extension(".ttl")
//!     .text_report(true)
//!     .fail_on_change(true)
//!     .build();
//!
//! // Load from file
//! use ontodiff::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None)?;
//! ```
//!
//! # Configuration File
//!
//! Place a `.ontodiff.yaml` file in your project root or `~/.config/ontodiff/`:
//!
//! ```yaml
//! discovery:
//!   extension: .owl
//!   prefix: top_
//! output:
//!   graph_format: trig
//!   text_report: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, DEFAULT_EXTENSION};
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, ComparisonConfig, DiffConfig, DiffPaths,
    DiscoveryConfig, OutputConfig, SequenceConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_config_file_over,
    load_layered, load_or_default, ConfigFileError, ConfigOverrides,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.ontodiff.yaml` config files. It can be used by editors for
/// validation and autocompletion.
///
/// # Errors
///
/// Returns the serializer error if the schema cannot be encoded.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

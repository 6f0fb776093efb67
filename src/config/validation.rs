//! Configuration validation for ontodiff.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, ComparisonConfig, DiscoveryConfig, OutputConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.discovery.validate());
        errors.extend(self.comparison.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for DiscoveryConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.extension.is_empty() {
            errors.push(ConfigError {
                field: "discovery.extension".to_string(),
                message: "Extension must not be empty".to_string(),
            });
        }
        if self.prefix.as_deref() == Some("") {
            errors.push(ConfigError {
                field: "discovery.prefix".to_string(),
                message: "Prefix must not be empty; omit it to match every file".to_string(),
            });
        }
        errors
    }
}

impl Validatable for ComparisonConfig {
    fn validate(&self) -> Vec<ConfigError> {
        self.annotation_properties
            .iter()
            .filter_map(|property| {
                crate::model::Iri::new(property.as_str())
                    .err()
                    .map(|e| ConfigError {
                        field: "comparison.annotation_properties".to_string(),
                        message: e.to_string(),
                    })
            })
            .collect()
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref dir) = self.output_dir {
            if dir.exists() && !dir.is_dir() {
                errors.push(ConfigError {
                    field: "output.output_dir".to_string(),
                    message: format!("Not a directory: {}", dir.display()),
                });
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_empty_extension_rejected() {
        let config = AppConfig::builder().extension("").build();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "discovery.extension");
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let config = AppConfig::builder().prefix(Some(String::new())).build();
        assert!(!config.is_valid());
    }

    #[test]
    fn test_invalid_annotation_properties_reported_individually() {
        let config = AppConfig::builder()
            .annotation_properties(vec![
                "http://www.w3.org/2000/01/rdf-schema#label".to_string(),
                "label".to_string(),
                "also not an iri".to_string(),
            ])
            .build();
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.field == "comparison.annotation_properties"));
    }

    #[test]
    fn test_output_dir_must_be_directory() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let config = AppConfig::builder()
            .output_dir(Some(tmp.path().to_path_buf()))
            .build();
        let errors = config.validate();
        assert_eq!(errors[0].field, "output.output_dir");
        assert!(errors[0].to_string().starts_with("output.output_dir: "));
    }
}

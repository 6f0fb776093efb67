//! Version discovery: which files in a directory form the version sequence.

use super::PipelineError;
use crate::config::DiscoveryConfig;
use crate::serialize::GraphFormat;
use std::path::{Path, PathBuf};
use tracing::debug;

/// List the ontology versions in `dir`.
///
/// Regular files whose name ends with the configured extension (and starts
/// with the prefix, when one is set), sorted lexicographically by file name.
/// Sub-directories are not searched.
///
/// # Errors
///
/// Returns [`PipelineError::Discovery`] if the directory cannot be read.
pub fn discover_versions(
    dir: &Path,
    config: &DiscoveryConfig,
) -> Result<Vec<PathBuf>, PipelineError> {
    let discovery_error = |source: std::io::Error| PipelineError::Discovery {
        dir: dir.to_path_buf(),
        source,
    };

    let mut versions = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(discovery_error)? {
        let entry = entry.map_err(discovery_error)?;
        if !entry.file_type().map_err(discovery_error)?.is_file() {
            continue;
        }
        let name = entry.file_name();
        match name.to_str() {
            Some(name) if config.matches(name) => versions.push(entry.path()),
            Some(_) => {}
            None => debug!(file = ?name, "skipping file with non UTF-8 name"),
        }
    }
    versions.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!(dir = %dir.display(), count = versions.len(), "discovered versions");
    Ok(versions)
}

/// Consecutive `(older, newer)` pairs of a sorted version list.
#[must_use]
pub fn version_pairs(versions: &[PathBuf]) -> Vec<(&Path, &Path)> {
    versions
        .windows(2)
        .map(|pair| (pair[0].as_path(), pair[1].as_path()))
        .collect()
}

/// File name of the diff artifact for a pair: `<olderFile>-<newerFile>.<ext>`.
#[must_use]
pub fn artifact_name(older: &Path, newer: &Path, format: GraphFormat) -> String {
    pair_stem(older, newer) + "." + format.extension()
}

/// File name of the text report for a pair: `<olderFile>-<newerFile>.txt`.
#[must_use]
pub fn report_name(older: &Path, newer: &Path) -> String {
    pair_stem(older, newer) + ".txt"
}

fn pair_stem(older: &Path, newer: &Path) -> String {
    format!("{}-{}", file_name(older), file_name(newer))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "").unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_discover_sorted_by_name() {
        let tmp = TempDir::new().unwrap();
        for name in ["v3.owl", "v1.owl", "v2.owl", "notes.txt"] {
            touch(tmp.path(), name);
        }
        std::fs::create_dir(tmp.path().join("old.owl")).unwrap();

        let versions = discover_versions(tmp.path(), &DiscoveryConfig::default()).unwrap();
        assert_eq!(names(&versions), ["v1.owl", "v2.owl", "v3.owl"]);
    }

    #[test]
    fn test_discover_with_prefix() {
        let tmp = TempDir::new().unwrap();
        for name in ["top_2024.owl", "top_2023.owl", "draft_2025.owl"] {
            touch(tmp.path(), name);
        }
        let config = DiscoveryConfig {
            extension: ".owl".to_string(),
            prefix: Some("top_".to_string()),
        };

        let versions = discover_versions(tmp.path(), &config).unwrap();
        assert_eq!(names(&versions), ["top_2023.owl", "top_2024.owl"]);
    }

    #[test]
    fn test_discover_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let err = discover_versions(&tmp.path().join("missing"), &DiscoveryConfig::default())
            .unwrap_err();
        assert!(matches!(err, PipelineError::Discovery { .. }));
    }

    #[test]
    fn test_version_pairs() {
        let versions: Vec<PathBuf> = ["a.owl", "b.owl", "c.owl"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let pairs = version_pairs(&versions);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], (Path::new("a.owl"), Path::new("b.owl")));
        assert_eq!(pairs[1], (Path::new("b.owl"), Path::new("c.owl")));

        assert!(version_pairs(&versions[..1]).is_empty());
        assert!(version_pairs(&[]).is_empty());
    }

    #[test]
    fn test_artifact_names() {
        let older = Path::new("/data/onto/v1.owl");
        let newer = Path::new("/data/onto/v2.owl");
        assert_eq!(artifact_name(older, newer, GraphFormat::TriG), "v1.owl-v2.owl.trig");
        assert_eq!(artifact_name(older, newer, GraphFormat::NQuads), "v1.owl-v2.owl.nq");
        assert_eq!(report_name(older, newer), "v1.owl-v2.owl.txt");
    }
}

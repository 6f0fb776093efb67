//! Ontology comparison: from two ontology documents to a [`ChangeSet`].
//!
//! The renderer never sees documents, only the [`Comparison`] an
//! [`OntologyComparator`] produces. [`RdfOntologyComparator`] is the default
//! implementation; other engines plug in through the trait.

mod rdf;
mod snapshot;

pub use rdf::{detect_format, RdfOntologyComparator};
pub use snapshot::{diff_snapshots, OntologySnapshot};

use crate::model::{ChangeSet, Iri, VersionId, VersionSide};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Computes the changes between two ontology documents.
pub trait OntologyComparator: Send + Sync {
    /// Compare `older` with `newer`, restricting annotation changes to
    /// `annotation_properties`.
    ///
    /// # Errors
    ///
    /// Returns an [`OntologyLoadError`] naming the side whose document could
    /// not be loaded.
    fn compare(
        &self,
        older: &Path,
        newer: &Path,
        annotation_properties: &[Iri],
    ) -> Result<Comparison, OntologyLoadError>;
}

/// Identity and size of one compared document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OntologyInfo {
    pub location: PathBuf,
    pub version: VersionId,
    pub class_count: usize,
}

/// Result of comparing two ontology versions.
#[derive(Debug, Clone, Serialize)]
#[must_use]
pub struct Comparison {
    pub older: OntologyInfo,
    pub newer: OntologyInfo,
    pub changes: ChangeSet,
}

/// Why a document failed to load.
#[derive(Error, Debug)]
pub enum LoadErrorKind {
    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("unrecognized ontology file extension '{0}'")]
    UnknownFormat(String),

    #[error("document declares no ontology IRI or version IRI")]
    MissingVersion,
}

/// A document of a version pair could not be loaded.
#[derive(Error, Debug)]
#[error("failed to load {side} ontology {}: {kind}", path.display())]
pub struct OntologyLoadError {
    pub side: VersionSide,
    pub path: PathBuf,
    #[source]
    pub kind: LoadErrorKind,
}

impl OntologyLoadError {
    pub fn new(side: VersionSide, path: impl Into<PathBuf>, kind: LoadErrorKind) -> Self {
        Self {
            side,
            path: path.into(),
            kind,
        }
    }

    /// Which document of the pair failed.
    #[must_use]
    pub const fn side(&self) -> VersionSide {
        self.side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_message_names_side_and_path() {
        let err = OntologyLoadError::new(
            VersionSide::Newer,
            "ontologies/v2.owl",
            LoadErrorKind::Parse("unexpected end of file".to_string()),
        );
        let msg = err.to_string();
        assert!(msg.contains("newer"));
        assert!(msg.contains("ontologies/v2.owl"));
        assert!(msg.contains("unexpected end of file"));
        assert_eq!(err.side(), VersionSide::Newer);
    }
}

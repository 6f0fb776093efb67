//! Ontology version identities.

use super::{InvalidIri, Iri};
use oxigraph::model::NamedNode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one ontology snapshot.
///
/// A version is addressed in the output graph through its namespace form: the
/// version IRI with a trailing `#` appended unless it already ends in `#` or
/// `/` or carries a fragment. The same IRI names the version's sub-graph, is
/// the subject/object of the successor link and is bound as a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(Iri);

impl VersionId {
    #[must_use]
    pub const fn new(iri: Iri) -> Self {
        Self(iri)
    }

    pub fn parse(iri: &str) -> Result<Self, InvalidIri> {
        Iri::new(iri).map(Self)
    }

    #[must_use]
    pub const fn iri(&self) -> &Iri {
        &self.0
    }

    /// Namespace IRI scoped to this version.
    #[must_use]
    pub fn namespace(&self) -> String {
        let s = self.0.as_str();
        if s.ends_with('#') || s.ends_with('/') || s.contains('#') {
            s.to_string()
        } else {
            format!("{s}#")
        }
    }

    /// The graph node standing for this version.
    #[must_use]
    pub fn node(&self) -> NamedNode {
        // Appending '#' to a fragment-less valid IRI keeps it valid.
        NamedNode::new_unchecked(self.namespace())
    }
}

impl From<Iri> for VersionId {
    fn from(iri: Iri) -> Self {
        Self(iri)
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Which document of a version pair an operation concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionSide {
    Older,
    Newer,
}

impl fmt::Display for VersionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Older => write!(f, "older"),
            Self::Newer => write!(f, "newer"),
        }
    }
}

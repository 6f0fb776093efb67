//! Identifiers for classes, properties, datatypes and ontology versions.

use oxigraph::model::{NamedNode, NamedNodeRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Error returned for strings that are not absolute IRIs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid IRI '{iri}': {reason}")]
pub struct InvalidIri {
    pub iri: String,
    pub reason: String,
}

/// A validated IRI.
///
/// Identities are persistent across ontology versions, so two `Iri`s are the
/// same class, property or datatype exactly when their strings are equal.
/// Ordering is by string, which keeps every collection of identities
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Iri(NamedNode);

impl Iri {
    /// Parse and validate an IRI.
    pub fn new(iri: impl Into<String>) -> Result<Self, InvalidIri> {
        let iri = iri.into();
        NamedNode::new(iri.clone()).map(Self).map_err(|e| InvalidIri {
            iri,
            reason: e.to_string(),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Borrow as an RDF named node.
    #[must_use]
    pub fn as_node(&self) -> NamedNodeRef<'_> {
        self.0.as_ref()
    }

    /// The part after the last `#` or `/`, or the whole IRI if that part is empty.
    #[must_use]
    pub fn local_name(&self) -> &str {
        let s = self.as_str();
        match s.rfind(['#', '/']) {
            Some(pos) if pos + 1 < s.len() => &s[pos + 1..],
            _ => s,
        }
    }

    #[must_use]
    pub fn into_node(self) -> NamedNode {
        self.0
    }
}

impl PartialOrd for Iri {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Iri {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<NamedNode> for Iri {
    fn from(node: NamedNode) -> Self {
        Self(node)
    }
}

impl From<NamedNodeRef<'_>> for Iri {
    fn from(node: NamedNodeRef<'_>) -> Self {
        Self(node.into_owned())
    }
}

impl From<Iri> for NamedNode {
    fn from(iri: Iri) -> Self {
        iri.0
    }
}

impl std::str::FromStr for Iri {
    type Err = InvalidIri;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Iri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Iri {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

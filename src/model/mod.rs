//! Input data model: version identities and the change sets between them.
//!
//! A [`ChangeSet`] is built once per version pair by an
//! [`OntologyComparator`](crate::compare::OntologyComparator) and is read-only
//! afterwards. Every collection in it is ordered, so rendering and reporting
//! are deterministic.

mod change_set;
mod iri;
mod version;

pub use change_set::{
    Annotation, AnnotationValue, ChangeSet, ChangeSetSummary, ClassDiff, Relation,
};
pub use iri::{InvalidIri, Iri};
pub use version::{VersionId, VersionSide};

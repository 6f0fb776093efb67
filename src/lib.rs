//! **Semantic diffs between OWL ontology versions, published as RDF.**
//!
//! `ontodiff` compares consecutive versions of an ontology at the level of
//! named classes and renders what changed as a statement graph in a small
//! versioning vocabulary. Each diff is a quad dataset: the successor link
//! between the two version identities sits in the default graph, and one
//! anonymous change event per added, deleted or modified class aspect sits in
//! a sub-graph named after the newer version.
//!
//! ## Core Concepts & Modules
//!
//! - **[`compare`]**: loads two ontology documents and computes the
//!   [`ChangeSet`] between them through the [`OntologyComparator`] trait.
//! - **[`model`]**: the change-set data model ([`ChangeSet`], [`ClassDiff`],
//!   [`Relation`], [`Annotation`]) and identities ([`Iri`], [`VersionId`]).
//! - **[`vocab`]**: the versioning vocabulary: change kinds and payload
//!   properties, in the canonical and the deprecated namespace.
//! - **[`render`]**: maps a change set onto the vocabulary, producing an
//!   immutable [`StatementGraph`].
//! - **[`serialize`]**: writes statement graphs as TriG or N-Quads.
//! - **[`reports`]**: text, summary and JSON reports for humans and tools.
//! - **[`pipeline`]**: version discovery and the pairwise run over a directory.
//!
//! ## Rendering a Change Set
//!
//! ```no_run
//! use ontodiff::{ChangeSet, ChangeSetRenderer, GraphFormat, GraphSerializer, Iri, VersionId};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let changes = ChangeSet::new().with_new_class(Iri::new("http://example.org/onto#Foo")?);
//!     let older = VersionId::parse("http://example.org/onto/v1")?;
//!     let newer = VersionId::parse("http://example.org/onto/v2")?;
//!
//!     let rendered = ChangeSetRenderer::default().render(&changes, &older, &newer)?;
//!     let trig = GraphSerializer::new(GraphFormat::TriG).to_bytes(&rendered.graph)?;
//!     println!("{}", String::from_utf8_lossy(&trig));
//!     Ok(())
//! }
//! ```
//!
//! ## Diffing a Directory of Versions
//!
//! ```no_run
//! use ontodiff::{run_sequence, AppConfig, RdfOntologyComparator};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::default().sequence_config("ontologies".into())?;
//!     let outcome = run_sequence(&RdfOntologyComparator::new(), &config)?;
//!     for pair in &outcome.pairs {
//!         println!("{} change events → {}", pair.summary.total(), pair.graph_path.display());
//!     }
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    // Variable names like `older`/`newer` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod reports;
pub mod serialize;
pub mod vocab;

// Re-export main types for convenience
pub use compare::{Comparison, OntologyComparator, OntologyLoadError, RdfOntologyComparator};
pub use config::{
    AppConfig, AppConfigBuilder, ConfigOverrides, ConfigPreset, DiffConfig, SequenceConfig,
};
pub use config::{ConfigError, Validatable};
pub use error::{ErrorContext, OntoDiffError, Result};
pub use model::{
    Annotation, AnnotationValue, ChangeSet, ClassDiff, Iri, Relation, VersionId, VersionSide,
};
pub use pipeline::{run_sequence, PipelineError, SequenceOutcome};
pub use render::{ChangeSetRenderer, RenderError, RenderedDiff, StatementGraph};
pub use reports::{ReportFormat, ReportGenerator};
pub use serialize::{GraphFormat, GraphSerializer, SerializeError};
pub use vocab::{ChangeKind, VocabularyVersion};

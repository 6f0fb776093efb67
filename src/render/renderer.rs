//! Change set to statement graph rendering.

use super::builder::{GraphBuilder, StatementGraph};
use crate::model::{
    Annotation, AnnotationValue, ChangeSet, ClassDiff, Iri, Relation, VersionId,
};
use crate::vocab::well_known::RDF_TYPE;
use crate::vocab::{ChangeKind, Property, Vocabulary, VocabularyVersion, PREFIX};
use oxigraph::model::{BlankNode, GraphName, Literal, NamedNode, NamedOrBlankNode, Term};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Prefix bound to the older version's namespace.
pub const OLDER_PREFIX: &str = "o1";
/// Prefix bound to the newer version's namespace.
pub const NEWER_PREFIX: &str = "o2";

/// Errors that fail a whole render call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// An annotation value cannot be written as a literal
    #[error("unsupported value {value} for annotation <{property}> on class <{class}>: {reason}")]
    UnsupportedAnnotationValue {
        class: Iri,
        property: Iri,
        value: String,
        reason: String,
    },
}

/// A relation in a [`ClassDiff`] that does not involve the diff's class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralInconsistency {
    pub class: Iri,
    pub relation: Relation,
}

impl fmt::Display for StructuralInconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is attributed to <{}> but does not reference it",
            self.relation, self.class
        )
    }
}

/// Number of emitted change events per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSummary {
    counts: BTreeMap<ChangeKind, usize>,
}

impl RenderSummary {
    fn record(&mut self, kind: ChangeKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    #[must_use]
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Total number of change events.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Non-zero counts in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (ChangeKind, usize)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }
}

/// Output of one render call.
#[derive(Debug, Clone)]
#[must_use]
pub struct RenderedDiff {
    pub graph: StatementGraph,
    pub summary: RenderSummary,
    pub inconsistencies: Vec<StructuralInconsistency>,
}

/// Maps change sets onto the versioning vocabulary.
///
/// Rendering is pure apart from `tracing` diagnostics: the same change set and
/// version pair always produce the same graph, blank node labels included.
#[derive(Debug, Clone, Copy)]
pub struct ChangeSetRenderer {
    vocabulary: &'static Vocabulary,
}

impl Default for ChangeSetRenderer {
    fn default() -> Self {
        Self::new(VocabularyVersion::Current)
    }
}

impl ChangeSetRenderer {
    pub fn new(version: VocabularyVersion) -> Self {
        if version.is_deprecated() {
            warn!(
                namespace = version.namespace(),
                "rendering with the deprecated legacy vocabulary namespace"
            );
        }
        Self {
            vocabulary: Vocabulary::get(version),
        }
    }

    #[must_use]
    pub const fn vocabulary(&self) -> &'static Vocabulary {
        self.vocabulary
    }

    /// Render `changes` as the diff from `older` to `newer`.
    ///
    /// The successor link `older → newer` is the only statement in the default
    /// graph; every change event lives in the sub-graph named after `newer`.
    pub fn render(
        &self,
        changes: &ChangeSet,
        older: &VersionId,
        newer: &VersionId,
    ) -> Result<RenderedDiff, RenderError> {
        let mut pass = RenderPass::new(self.vocabulary, newer.node());
        pass.builder.bind_prefix(PREFIX, self.vocabulary.namespace());
        pass.builder.bind_prefix(OLDER_PREFIX, older.namespace());
        pass.builder.bind_prefix(NEWER_PREFIX, newer.namespace());
        let successor = pass.term(Property::HasSuccessorVersion);
        pass.builder
            .add(older.node(), successor, newer.node(), GraphName::DefaultGraph);

        for class in &changes.new_classes {
            pass.event(class, ChangeKind::Addition);
        }
        for class in &changes.deleted_classes {
            pass.event(class, ChangeKind::Deletion);
        }
        for diff in &changes.changed_classes {
            pass.class_diff(diff)?;
        }

        debug!(
            events = pass.summary.total(),
            statements = pass.builder.len(),
            "rendered change set"
        );
        Ok(RenderedDiff {
            graph: pass.builder.freeze(),
            summary: pass.summary,
            inconsistencies: pass.inconsistencies,
        })
    }
}

// ============================================================================
// Render pass
// ============================================================================

#[derive(Clone, Copy)]
enum Direction {
    Added,
    Removed,
}

impl Direction {
    const fn sub_term(self) -> ChangeKind {
        match self {
            Self::Added => ChangeKind::SubTermAddition,
            Self::Removed => ChangeKind::SubTermDeletion,
        }
    }

    const fn super_term(self) -> ChangeKind {
        match self {
            Self::Added => ChangeKind::SuperTermAddition,
            Self::Removed => ChangeKind::SuperTermDeletion,
        }
    }

    const fn equivalence(self) -> ChangeKind {
        match self {
            Self::Added => ChangeKind::EquivalenceAddition,
            Self::Removed => ChangeKind::EquivalenceDeletion,
        }
    }

    const fn label(self) -> ChangeKind {
        match self {
            Self::Added => ChangeKind::LabelAddition,
            Self::Removed => ChangeKind::LabelDeletion,
        }
    }
}

/// State of a single render call. Dropped on error, so a failed render never
/// leaks a partial graph.
struct RenderPass {
    vocabulary: &'static Vocabulary,
    graph: GraphName,
    builder: GraphBuilder,
    next_event: usize,
    summary: RenderSummary,
    inconsistencies: Vec<StructuralInconsistency>,
}

impl RenderPass {
    fn new(vocabulary: &'static Vocabulary, graph: NamedNode) -> Self {
        Self {
            vocabulary,
            graph: graph.into(),
            builder: GraphBuilder::new(),
            next_event: 0,
            summary: RenderSummary::default(),
            inconsistencies: Vec::new(),
        }
    }

    fn term(&self, property: Property) -> NamedNode {
        self.vocabulary.property(property).into_owned()
    }

    fn add(
        &mut self,
        subject: impl Into<NamedOrBlankNode>,
        property: Property,
        object: impl Into<Term>,
    ) {
        let predicate = self.term(property);
        self.builder.add(subject, predicate, object, self.graph.clone());
    }

    /// Create a fresh event node of `kind` attached to `class`.
    fn event(&mut self, class: &Iri, kind: ChangeKind) -> BlankNode {
        // "c" followed by digits is always a valid blank node label.
        let event = BlankNode::new_unchecked(format!("c{}", self.next_event));
        self.next_event += 1;

        self.add(
            class.as_node().into_owned(),
            Property::HasChange,
            event.clone(),
        );
        self.builder.add(
            event.clone(),
            RDF_TYPE,
            self.vocabulary.kind(kind).into_owned(),
            self.graph.clone(),
        );
        self.summary.record(kind);
        event
    }

    /// Event carrying a related class as its new or old term.
    fn related_event(&mut self, class: &Iri, kind: ChangeKind, related: &Iri) {
        let event = self.event(class, kind);
        if let Some(property) = kind.related_term_property() {
            self.add(event, property, related.as_node().into_owned());
        }
    }

    fn class_diff(&mut self, diff: &ClassDiff) -> Result<(), RenderError> {
        let class = &diff.class;
        for relation in &diff.added_relations {
            self.relation(class, relation, Direction::Added);
        }
        for relation in &diff.removed_relations {
            self.relation(class, relation, Direction::Removed);
        }
        for annotation in &diff.added_annotations {
            self.annotation(class, annotation, Direction::Added)?;
        }
        for annotation in &diff.removed_annotations {
            self.annotation(class, annotation, Direction::Removed)?;
        }
        Ok(())
    }

    fn relation(&mut self, class: &Iri, relation: &Relation, direction: Direction) {
        match relation {
            Relation::SubClassOf {
                sub_class,
                super_class,
            } => {
                if super_class == class {
                    self.related_event(class, direction.sub_term(), sub_class);
                } else if sub_class == class {
                    self.related_event(class, direction.super_term(), super_class);
                } else {
                    self.inconsistent(class, relation);
                }
            }
            Relation::EquivalentClasses { members } => {
                if !members.contains(class) {
                    self.inconsistent(class, relation);
                    return;
                }
                for member in members.iter().filter(|member| *member != class) {
                    self.related_event(class, direction.equivalence(), member);
                }
            }
        }
    }

    fn annotation(
        &mut self,
        class: &Iri,
        annotation: &Annotation,
        direction: Direction,
    ) -> Result<(), RenderError> {
        let value = annotation_literal(class, annotation)?;
        let event = self.event(class, direction.label());
        self.add(
            event.clone(),
            Property::AnnotationProperty,
            annotation.property.as_node().into_owned(),
        );
        self.add(event, Property::AnnotationValue, value);
        Ok(())
    }

    fn inconsistent(&mut self, class: &Iri, relation: &Relation) {
        warn!(
            class = %class,
            relation = %relation,
            "relation does not reference its class, skipping change event"
        );
        self.inconsistencies.push(StructuralInconsistency {
            class: class.clone(),
            relation: relation.clone(),
        });
    }
}

/// Build the literal for an annotation value: language-tagged when a language
/// is present, otherwise typed with the declared datatype.
fn annotation_literal(class: &Iri, annotation: &Annotation) -> Result<Literal, RenderError> {
    let unsupported = |reason: String| RenderError::UnsupportedAnnotationValue {
        class: class.clone(),
        property: annotation.property.clone(),
        value: annotation.value.to_string(),
        reason,
    };
    match &annotation.value {
        AnnotationValue::LanguageTagged { text, language } => {
            Literal::new_language_tagged_literal(text.as_str(), language.as_str())
                .map_err(|e| unsupported(format!("invalid language tag: {e}")))
        }
        AnnotationValue::Typed { text, datatype } => Ok(Literal::new_typed_literal(
            text.as_str(),
            datatype.as_node().into_owned(),
        )),
        AnnotationValue::Resource { .. } => {
            Err(unsupported("value is a resource, not a literal".to_string()))
        }
    }
}

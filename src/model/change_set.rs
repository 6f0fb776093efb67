//! Change sets produced by an ontology comparison.

use super::Iri;
use crate::vocab::well_known::XSD_STRING;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ============================================================================
// Relations
// ============================================================================

/// A structural axiom between classes.
///
/// Dispatch over relations is an exhaustive `match`, so a new variant has to be
/// handled everywhere relations are rendered or reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Relation {
    /// `sub_class` is a subclass of `super_class`
    SubClassOf { sub_class: Iri, super_class: Iri },
    /// All members are mutually equivalent
    EquivalentClasses { members: BTreeSet<Iri> },
}

impl Relation {
    #[must_use]
    pub const fn sub_class_of(sub_class: Iri, super_class: Iri) -> Self {
        Self::SubClassOf {
            sub_class,
            super_class,
        }
    }

    pub fn equivalent(members: impl IntoIterator<Item = Iri>) -> Self {
        Self::EquivalentClasses {
            members: members.into_iter().collect(),
        }
    }

    /// Whether `class` takes part in this relation.
    #[must_use]
    pub fn mentions(&self, class: &Iri) -> bool {
        match self {
            Self::SubClassOf {
                sub_class,
                super_class,
            } => sub_class == class || super_class == class,
            Self::EquivalentClasses { members } => members.contains(class),
        }
    }

    /// Every class referenced by this relation.
    #[must_use]
    pub fn classes(&self) -> Vec<&Iri> {
        match self {
            Self::SubClassOf {
                sub_class,
                super_class,
            } => vec![sub_class, super_class],
            Self::EquivalentClasses { members } => members.iter().collect(),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubClassOf {
                sub_class,
                super_class,
            } => write!(f, "SubClassOf(<{sub_class}> <{super_class}>)"),
            Self::EquivalentClasses { members } => {
                write!(f, "EquivalentClasses(")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "<{member}>")?;
                }
                write!(f, ")")
            }
        }
    }
}

// ============================================================================
// Annotations
// ============================================================================

/// Value of an annotation assertion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnotationValue {
    /// Text with a language tag
    LanguageTagged { text: String, language: String },
    /// Text with a datatype
    Typed { text: String, datatype: Iri },
    /// A reference to another resource. Not a literal; rendering rejects it.
    Resource { iri: Iri },
}

impl AnnotationValue {
    pub fn language_tagged(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self::LanguageTagged {
            text: text.into(),
            language: language.into(),
        }
    }

    pub fn typed(text: impl Into<String>, datatype: Iri) -> Self {
        Self::Typed {
            text: text.into(),
            datatype,
        }
    }

    /// An `xsd:string` literal.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::typed(text, Iri::from(XSD_STRING))
    }

    #[must_use]
    pub const fn is_literal(&self) -> bool {
        !matches!(self, Self::Resource { .. })
    }

    /// Lexical text of a literal value.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::LanguageTagged { text, .. } | Self::Typed { text, .. } => Some(text),
            Self::Resource { .. } => None,
        }
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LanguageTagged { text, language } => write!(f, "\"{text}\"@{language}"),
            Self::Typed { text, datatype } if datatype.as_node() == XSD_STRING => {
                write!(f, "\"{text}\"")
            }
            Self::Typed { text, datatype } => write!(f, "\"{text}\"^^<{datatype}>"),
            Self::Resource { iri } => write!(f, "<{iri}>"),
        }
    }
}

/// A property/value pair attached to a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Annotation {
    pub property: Iri,
    pub value: AnnotationValue,
}

impl Annotation {
    #[must_use]
    pub const fn new(property: Iri, value: AnnotationValue) -> Self {
        Self { property, value }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Annotation(<{}> {})", self.property, self.value)
    }
}

// ============================================================================
// Class diffs
// ============================================================================

/// Differences detected for one class present in both versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDiff {
    pub class: Iri,
    #[serde(default)]
    pub added_relations: BTreeSet<Relation>,
    #[serde(default)]
    pub removed_relations: BTreeSet<Relation>,
    #[serde(default)]
    pub added_annotations: BTreeSet<Annotation>,
    #[serde(default)]
    pub removed_annotations: BTreeSet<Annotation>,
}

impl ClassDiff {
    #[must_use]
    pub fn new(class: Iri) -> Self {
        Self {
            class,
            added_relations: BTreeSet::new(),
            removed_relations: BTreeSet::new(),
            added_annotations: BTreeSet::new(),
            removed_annotations: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_added_relation(mut self, relation: Relation) -> Self {
        self.added_relations.insert(relation);
        self
    }

    #[must_use]
    pub fn with_removed_relation(mut self, relation: Relation) -> Self {
        self.removed_relations.insert(relation);
        self
    }

    #[must_use]
    pub fn with_added_annotation(mut self, annotation: Annotation) -> Self {
        self.added_annotations.insert(annotation);
        self
    }

    #[must_use]
    pub fn with_removed_annotation(mut self, annotation: Annotation) -> Self {
        self.removed_annotations.insert(annotation);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added_relations.is_empty()
            && self.removed_relations.is_empty()
            && self.added_annotations.is_empty()
            && self.removed_annotations.is_empty()
    }
}

// ============================================================================
// Change sets
// ============================================================================

/// Everything that differs between an older and a newer ontology version.
///
/// Missing collections deserialize as empty, and empty collections render to
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[must_use]
pub struct ChangeSet {
    /// Classes only present in the newer version
    pub new_classes: BTreeSet<Iri>,
    /// Classes only present in the older version
    pub deleted_classes: BTreeSet<Iri>,
    /// Classes present in both versions with differences
    pub changed_classes: Vec<ClassDiff>,
    /// Display labels, used by text reports only
    pub labels: BTreeMap<Iri, BTreeSet<String>>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_new_class(mut self, class: Iri) -> Self {
        self.new_classes.insert(class);
        self
    }

    pub fn with_deleted_class(mut self, class: Iri) -> Self {
        self.deleted_classes.insert(class);
        self
    }

    pub fn with_changed_class(mut self, diff: ClassDiff) -> Self {
        self.changed_classes.push(diff);
        self
    }

    pub fn with_label(mut self, class: Iri, label: impl Into<String>) -> Self {
        self.labels.entry(class).or_default().insert(label.into());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new_classes.is_empty()
            && self.deleted_classes.is_empty()
            && self.changed_classes.iter().all(ClassDiff::is_empty)
    }

    /// Display labels of `class`, possibly none.
    pub fn labels_of<'a>(&'a self, class: &Iri) -> impl Iterator<Item = &'a str> + 'a {
        self.labels
            .get(class)
            .into_iter()
            .flat_map(|labels| labels.iter().map(String::as_str))
    }

    /// Aggregate counts.
    pub fn summary(&self) -> ChangeSetSummary {
        let mut summary = ChangeSetSummary {
            classes_added: self.new_classes.len(),
            classes_deleted: self.deleted_classes.len(),
            classes_changed: self.changed_classes.len(),
            ..ChangeSetSummary::default()
        };
        for diff in &self.changed_classes {
            summary.relations_added += diff.added_relations.len();
            summary.relations_removed += diff.removed_relations.len();
            summary.annotations_added += diff.added_annotations.len();
            summary.annotations_removed += diff.removed_annotations.len();
        }
        summary
    }
}

/// Counts over a [`ChangeSet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSetSummary {
    pub classes_added: usize,
    pub classes_deleted: usize,
    pub classes_changed: usize,
    pub relations_added: usize,
    pub relations_removed: usize,
    pub annotations_added: usize,
    pub annotations_removed: usize,
}

impl ChangeSetSummary {
    #[must_use]
    pub const fn total_class_changes(&self) -> usize {
        self.classes_added + self.classes_deleted + self.classes_changed
    }
}

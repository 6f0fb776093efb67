//! The versioning vocabulary: statement types and properties of the diff graph.
//!
//! The schema is versioned. [`VocabularyVersion::Current`] is canonical;
//! [`VocabularyVersion::Legacy`] keeps the superseded namespace addressable for
//! consumers that still read older output.
//!
//! Term IRIs are built once per version and shared process-wide, see
//! [`Vocabulary::get`].

pub mod well_known;

use clap::ValueEnum;
use oxigraph::model::{NamedNode, NamedNodeRef};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Canonical namespace of the versioning vocabulary.
pub const NAMESPACE: &str = "https://top.smith.care/terminology/changes#";

/// Deprecated alias namespace, superseded by [`NAMESPACE`].
pub const LEGACY_NAMESPACE: &str = "https://top.smith.care/terminology/versioning#";

/// Prefix bound to the vocabulary namespace in serialized output.
pub const PREFIX: &str = "v";

// ============================================================================
// Vocabulary versions
// ============================================================================

/// Which namespace the renderer writes its terms into.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyVersion {
    /// The canonical namespace
    #[default]
    Current,
    /// The superseded namespace (deprecated)
    Legacy,
}

impl VocabularyVersion {
    #[must_use]
    pub const fn namespace(self) -> &'static str {
        match self {
            Self::Current => NAMESPACE,
            Self::Legacy => LEGACY_NAMESPACE,
        }
    }

    #[must_use]
    pub const fn is_deprecated(self) -> bool {
        matches!(self, Self::Legacy)
    }
}

impl fmt::Display for VocabularyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

// ============================================================================
// Change kinds
// ============================================================================

/// The closed set of change-event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChangeKind {
    Addition,
    Deletion,
    SubTermAddition,
    SubTermDeletion,
    SuperTermAddition,
    SuperTermDeletion,
    EquivalenceAddition,
    EquivalenceDeletion,
    LabelAddition,
    LabelDeletion,
}

impl ChangeKind {
    /// All kinds, in schema order.
    pub const ALL: [Self; 10] = [
        Self::Addition,
        Self::Deletion,
        Self::SubTermAddition,
        Self::SubTermDeletion,
        Self::SuperTermAddition,
        Self::SuperTermDeletion,
        Self::EquivalenceAddition,
        Self::EquivalenceDeletion,
        Self::LabelAddition,
        Self::LabelDeletion,
    ];

    /// Local name of the type term inside the vocabulary namespace.
    #[must_use]
    pub const fn local_name(self) -> &'static str {
        match self {
            Self::Addition => "Addition",
            Self::Deletion => "Deletion",
            Self::SubTermAddition => "SubTermAddition",
            Self::SubTermDeletion => "SubTermDeletion",
            Self::SuperTermAddition => "SuperTermAddition",
            Self::SuperTermDeletion => "SuperTermDeletion",
            Self::EquivalenceAddition => "EquivalenceAddition",
            Self::EquivalenceDeletion => "EquivalenceDeletion",
            Self::LabelAddition => "LabelAddition",
            Self::LabelDeletion => "LabelDeletion",
        }
    }

    #[must_use]
    pub const fn is_addition(self) -> bool {
        matches!(
            self,
            Self::Addition
                | Self::SubTermAddition
                | Self::SuperTermAddition
                | Self::EquivalenceAddition
                | Self::LabelAddition
        )
    }

    #[must_use]
    pub const fn is_label_change(self) -> bool {
        matches!(self, Self::LabelAddition | Self::LabelDeletion)
    }

    /// Property carrying the related class on structural events.
    ///
    /// `None` for whole-class and label events, which carry no related term.
    #[must_use]
    pub const fn related_term_property(self) -> Option<Property> {
        match self {
            Self::SubTermAddition | Self::SuperTermAddition | Self::EquivalenceAddition => {
                Some(Property::NewTerm)
            }
            Self::SubTermDeletion | Self::SuperTermDeletion | Self::EquivalenceDeletion => {
                Some(Property::OldTerm)
            }
            Self::Addition | Self::Deletion | Self::LabelAddition | Self::LabelDeletion => None,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

/// Error returned when a string names no [`ChangeKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown change kind: {0}")]
pub struct UnknownChangeKind(pub String);

impl FromStr for ChangeKind {
    type Err = UnknownChangeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.local_name() == s)
            .ok_or_else(|| UnknownChangeKind(s.to_string()))
    }
}

// ============================================================================
// Properties
// ============================================================================

/// Properties of the versioning vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    HasSuccessorVersion,
    HasChange,
    NewTerm,
    OldTerm,
    /// Declared in the schema, never populated by the renderer.
    NewLabel,
    /// Declared in the schema, never populated by the renderer.
    OldLabel,
    AnnotationProperty,
    AnnotationValue,
    /// Declared in the schema, never populated by the renderer.
    AnnotationDatatype,
}

impl Property {
    pub const ALL: [Self; 9] = [
        Self::HasSuccessorVersion,
        Self::HasChange,
        Self::NewTerm,
        Self::OldTerm,
        Self::NewLabel,
        Self::OldLabel,
        Self::AnnotationProperty,
        Self::AnnotationValue,
        Self::AnnotationDatatype,
    ];

    #[must_use]
    pub const fn local_name(self) -> &'static str {
        match self {
            Self::HasSuccessorVersion => "hasSuccessorVersion",
            Self::HasChange => "hasChange",
            Self::NewTerm => "newTerm",
            Self::OldTerm => "oldTerm",
            Self::NewLabel => "newLabel",
            Self::OldLabel => "oldLabel",
            Self::AnnotationProperty => "annotationProperty",
            Self::AnnotationValue => "annotationValue",
            Self::AnnotationDatatype => "annotationDatatype",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

// ============================================================================
// Resolved vocabulary
// ============================================================================

/// Term IRIs of one vocabulary version.
#[derive(Debug)]
pub struct Vocabulary {
    version: VocabularyVersion,
    properties: Vec<NamedNode>,
    kinds: Vec<NamedNode>,
}

static CURRENT: OnceLock<Vocabulary> = OnceLock::new();
static LEGACY: OnceLock<Vocabulary> = OnceLock::new();

impl Vocabulary {
    /// The shared, lazily built vocabulary for `version`.
    #[must_use]
    pub fn get(version: VocabularyVersion) -> &'static Self {
        let cell = match version {
            VocabularyVersion::Current => &CURRENT,
            VocabularyVersion::Legacy => &LEGACY,
        };
        cell.get_or_init(|| Self::build(version))
    }

    fn build(version: VocabularyVersion) -> Self {
        let ns = version.namespace();
        // Namespace and local names are constants, so the concatenation is a valid IRI.
        let term = |local: &str| NamedNode::new_unchecked(format!("{ns}{local}"));
        Self {
            version,
            properties: Property::ALL.iter().map(|p| term(p.local_name())).collect(),
            kinds: ChangeKind::ALL.iter().map(|k| term(k.local_name())).collect(),
        }
    }

    #[must_use]
    pub const fn version(&self) -> VocabularyVersion {
        self.version
    }

    #[must_use]
    pub const fn namespace(&self) -> &'static str {
        self.version.namespace()
    }

    #[must_use]
    pub fn property(&self, property: Property) -> NamedNodeRef<'_> {
        self.properties[property.index()].as_ref()
    }

    #[must_use]
    pub fn kind(&self, kind: ChangeKind) -> NamedNodeRef<'_> {
        self.kinds[kind.index()].as_ref()
    }

    /// Map a type IRI back to its change kind.
    #[must_use]
    pub fn kind_of(&self, iri: NamedNodeRef<'_>) -> Option<ChangeKind> {
        iri.as_str()
            .strip_prefix(self.namespace())
            .and_then(|local| local.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_local_names_roundtrip() {
        for kind in ChangeKind::ALL {
            assert_eq!(kind.local_name().parse::<ChangeKind>(), Ok(kind));
        }
        assert!("Modification".parse::<ChangeKind>().is_err());
    }

    #[test]
    fn test_related_term_property() {
        assert_eq!(
            ChangeKind::SubTermAddition.related_term_property(),
            Some(Property::NewTerm)
        );
        assert_eq!(
            ChangeKind::EquivalenceDeletion.related_term_property(),
            Some(Property::OldTerm)
        );
        assert_eq!(ChangeKind::Addition.related_term_property(), None);
        assert_eq!(ChangeKind::LabelDeletion.related_term_property(), None);
    }

    #[test]
    fn test_current_vocabulary_terms() {
        let vocab = Vocabulary::get(VocabularyVersion::Current);
        assert_eq!(
            vocab.property(Property::HasChange).as_str(),
            "https://top.smith.care/terminology/changes#hasChange"
        );
        assert_eq!(
            vocab.kind(ChangeKind::LabelAddition).as_str(),
            "https://top.smith.care/terminology/changes#LabelAddition"
        );
    }

    #[test]
    fn test_legacy_vocabulary_uses_alias_namespace() {
        let vocab = Vocabulary::get(VocabularyVersion::Legacy);
        assert!(vocab.version().is_deprecated());
        assert!(vocab
            .property(Property::OldTerm)
            .as_str()
            .starts_with(LEGACY_NAMESPACE));
    }

    #[test]
    fn test_kind_of() {
        let vocab = Vocabulary::get(VocabularyVersion::Current);
        for kind in ChangeKind::ALL {
            assert_eq!(vocab.kind_of(vocab.kind(kind)), Some(kind));
        }
        assert_eq!(vocab.kind_of(well_known::OWL_CLASS), None);
        // Terms of the other version are not recognized
        let legacy = Vocabulary::get(VocabularyVersion::Legacy);
        assert_eq!(vocab.kind_of(legacy.kind(ChangeKind::Addition)), None);
    }

    #[test]
    fn test_vocabulary_is_shared() {
        let a = Vocabulary::get(VocabularyVersion::Current);
        let b = Vocabulary::get(VocabularyVersion::Current);
        assert!(std::ptr::eq(a, b));
    }
}

//! RDF-based ontology comparison.
//!
//! Documents are parsed with `oxigraph`'s streaming parsers and reduced to an
//! [`OntologySnapshot`]: named classes, subclass and equivalence axioms between
//! named classes, and annotations of interest. Anything else in the document
//! (restrictions, individuals, property axioms) is ignored.

use super::snapshot::{diff_snapshots, OntologySnapshot};
use super::{Comparison, LoadErrorKind, OntologyComparator, OntologyInfo, OntologyLoadError};
use crate::model::{Annotation, AnnotationValue, Iri, Relation, VersionId, VersionSide};
use crate::vocab::well_known::{
    OWL_CLASS, OWL_EQUIVALENT_CLASS, OWL_ONTOLOGY, OWL_VERSION_IRI, RDFS_LABEL,
    RDFS_SUB_CLASS_OF, RDF_TYPE,
};
use oxigraph::io::{RdfFormat, RdfParseError, RdfParser};
use oxigraph::model::{NamedNode, NamedOrBlankNode, Quad, Term};
use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info, warn};

/// Default [`OntologyComparator`] reading any RDF syntax `oxigraph` supports.
///
/// The syntax is chosen from the file extension, see [`detect_format`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RdfOntologyComparator;

impl RdfOntologyComparator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Load one document into a snapshot.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, or declares no version.
    pub fn load(
        &self,
        path: &Path,
        side: VersionSide,
        annotation_properties: &[Iri],
    ) -> Result<OntologySnapshot, OntologyLoadError> {
        let fail = |kind| OntologyLoadError::new(side, path, kind);

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let format = detect_format(path)
            .ok_or_else(|| fail(LoadErrorKind::UnknownFormat(extension.to_string())))?;
        let file = File::open(path).map_err(|e| fail(LoadErrorKind::Io(e)))?;

        let mut parser = RdfParser::from_format(format);
        if let Some(base) = base_iri(path) {
            parser = parser
                .with_base_iri(base.as_str())
                .map_err(|e| fail(LoadErrorKind::Parse(e.to_string())))?;
        }

        let mut quads = Vec::new();
        for quad in parser.for_reader(BufReader::new(file)) {
            quads.push(quad.map_err(|e| fail(parse_error_kind(e)))?);
        }
        debug!(path = %path.display(), statements = quads.len(), "parsed ontology document");

        let version = version_of(&quads, path).ok_or_else(|| fail(LoadErrorKind::MissingVersion))?;
        Ok(build_snapshot(version, &quads, annotation_properties))
    }
}

impl OntologyComparator for RdfOntologyComparator {
    fn compare(
        &self,
        older: &Path,
        newer: &Path,
        annotation_properties: &[Iri],
    ) -> Result<Comparison, OntologyLoadError> {
        let (older_snapshot, newer_snapshot) = rayon::join(
            || self.load(older, VersionSide::Older, annotation_properties),
            || self.load(newer, VersionSide::Newer, annotation_properties),
        );
        let older_snapshot = older_snapshot?;
        let newer_snapshot = newer_snapshot?;

        let changes = diff_snapshots(&older_snapshot, &newer_snapshot);
        let summary = changes.summary();
        info!(
            older = %older_snapshot.version,
            newer = %newer_snapshot.version,
            added = summary.classes_added,
            deleted = summary.classes_deleted,
            changed = summary.classes_changed,
            "compared ontology versions"
        );

        Ok(Comparison {
            older: OntologyInfo {
                location: older.to_path_buf(),
                version: older_snapshot.version,
                class_count: older_snapshot.classes.len(),
            },
            newer: OntologyInfo {
                location: newer.to_path_buf(),
                version: newer_snapshot.version,
                class_count: newer_snapshot.classes.len(),
            },
            changes,
        })
    }
}

/// RDF syntax for an ontology file, by extension.
///
/// OWL files (`.owl`) are read as RDF/XML, which is how ontology editors
/// save them by default.
#[must_use]
pub fn detect_format(path: &Path) -> Option<RdfFormat> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "owl" | "rdf" | "xml" | "rdfxml" => Some(RdfFormat::RdfXml),
        other => RdfFormat::from_extension(other),
    }
}

/// A `file:` IRI for resolving relative references in the document.
fn base_iri(path: &Path) -> Option<Iri> {
    let absolute = std::fs::canonicalize(path).ok()?;
    let path = absolute.to_str()?.replace('\\', "/");
    let iri = if path.starts_with('/') {
        format!("file://{path}")
    } else {
        format!("file:///{path}")
    };
    Iri::new(iri).ok()
}

fn parse_error_kind(error: RdfParseError) -> LoadErrorKind {
    match error {
        RdfParseError::Io(e) => LoadErrorKind::Io(e),
        RdfParseError::Syntax(e) => LoadErrorKind::Parse(e.to_string()),
    }
}

/// The version IRI of the ontology header, else the ontology IRI.
fn version_of(quads: &[Quad], path: &Path) -> Option<VersionId> {
    let ontology = quads.iter().find_map(|q| match &q.subject {
        NamedOrBlankNode::NamedNode(subject)
            if q.predicate == RDF_TYPE && q.object == Term::from(OWL_ONTOLOGY.into_owned()) =>
        {
            Some(subject.clone())
        }
        _ => None,
    })?;

    let version_iri = quads.iter().find_map(|q| match (&q.subject, &q.object) {
        (NamedOrBlankNode::NamedNode(s), Term::NamedNode(o))
            if *s == ontology && q.predicate == OWL_VERSION_IRI =>
        {
            Some(o.clone())
        }
        _ => None,
    });

    match version_iri {
        Some(iri) => Some(VersionId::new(iri.into())),
        None => {
            warn!(
                path = %path.display(),
                ontology = %ontology,
                "no owl:versionIRI declared, using the ontology IRI as version"
            );
            Some(VersionId::new(ontology.into()))
        }
    }
}

fn build_snapshot(
    version: VersionId,
    quads: &[Quad],
    annotation_properties: &[Iri],
) -> OntologySnapshot {
    let owl_class = Term::from(OWL_CLASS.into_owned());
    let mut snapshot = OntologySnapshot::new(version);

    snapshot.classes = quads
        .iter()
        .filter(|q| q.predicate == RDF_TYPE && q.object == owl_class)
        .filter_map(|q| named_subject(q).map(|s| Iri::from(s.clone())))
        .collect();

    let properties: HashSet<&str> = annotation_properties.iter().map(Iri::as_str).collect();

    for quad in quads {
        let Some(subject) = named_subject(quad) else {
            continue;
        };
        let subject = Iri::from(subject.clone());

        if quad.predicate == RDFS_SUB_CLASS_OF || quad.predicate == OWL_EQUIVALENT_CLASS {
            let Term::NamedNode(object) = &quad.object else {
                continue;
            };
            let object = Iri::from(object.clone());
            if object == subject {
                continue;
            }
            let relation = if quad.predicate == RDFS_SUB_CLASS_OF {
                Relation::sub_class_of(subject, object)
            } else {
                Relation::equivalent([subject, object])
            };
            snapshot.relations.insert(relation);
            continue;
        }

        if !snapshot.classes.contains(&subject) {
            continue;
        }

        if quad.predicate == RDFS_LABEL {
            if let Term::Literal(literal) = &quad.object {
                snapshot
                    .labels
                    .entry(subject.clone())
                    .or_default()
                    .insert(literal.value().to_string());
            }
        }

        if properties.contains(quad.predicate.as_str()) {
            if let Some(value) = annotation_value(&quad.object) {
                snapshot
                    .annotations
                    .entry(subject)
                    .or_insert_with(BTreeSet::new)
                    .insert(Annotation::new(Iri::from(quad.predicate.clone()), value));
            }
        }
    }

    debug!(
        version = %snapshot.version,
        classes = snapshot.classes.len(),
        relations = snapshot.relations.len(),
        "built ontology snapshot"
    );
    snapshot
}

fn named_subject(quad: &Quad) -> Option<&NamedNode> {
    match &quad.subject {
        NamedOrBlankNode::NamedNode(node) => Some(node),
        NamedOrBlankNode::BlankNode(_) => None,
    }
}

/// Annotation value of an object term. Blank nodes carry no identity across
/// versions and are dropped.
fn annotation_value(term: &Term) -> Option<AnnotationValue> {
    match term {
        Term::Literal(literal) => Some(match literal.language() {
            Some(language) => AnnotationValue::language_tagged(literal.value(), language),
            None => AnnotationValue::typed(literal.value(), Iri::from(literal.datatype())),
        }),
        Term::NamedNode(node) => Some(AnnotationValue::Resource {
            iri: Iri::from(node.clone()),
        }),
        _ => None,
    }
}

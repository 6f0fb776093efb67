//! Per-version class inventories and the diff between two of them.

use crate::model::{Annotation, ChangeSet, ClassDiff, Iri, Relation, VersionId};
use std::collections::{BTreeMap, BTreeSet};

/// What one ontology version says about its named classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntologySnapshot {
    pub version: VersionId,
    pub classes: BTreeSet<Iri>,
    /// Subclass and equivalence axioms between named classes
    pub relations: BTreeSet<Relation>,
    /// Annotations of interest, per class
    pub annotations: BTreeMap<Iri, BTreeSet<Annotation>>,
    /// Display labels, per class
    pub labels: BTreeMap<Iri, BTreeSet<String>>,
}

impl OntologySnapshot {
    #[must_use]
    pub fn new(version: VersionId) -> Self {
        Self {
            version,
            classes: BTreeSet::new(),
            relations: BTreeSet::new(),
            annotations: BTreeMap::new(),
            labels: BTreeMap::new(),
        }
    }

    /// Relations attributed to `class`: every relation that references it.
    fn relations_of<'a>(&'a self, class: &'a Iri) -> impl Iterator<Item = &'a Relation> + 'a {
        self.relations.iter().filter(move |r| r.mentions(class))
    }

    fn annotations_of(&self, class: &Iri) -> Option<&BTreeSet<Annotation>> {
        self.annotations.get(class)
    }
}

/// Compute the change set from `older` to `newer`.
///
/// A class is changed when its attributed relations or its annotations of
/// interest differ between the two versions. Labels of added and changed
/// classes come from `newer`, labels of deleted classes from `older`.
pub fn diff_snapshots(older: &OntologySnapshot, newer: &OntologySnapshot) -> ChangeSet {
    let mut changes = ChangeSet::new();
    changes.new_classes = newer.classes.difference(&older.classes).cloned().collect();
    changes.deleted_classes = older.classes.difference(&newer.classes).cloned().collect();

    let empty = BTreeSet::new();
    for class in older.classes.intersection(&newer.classes) {
        let before: BTreeSet<&Relation> = older.relations_of(class).collect();
        let after: BTreeSet<&Relation> = newer.relations_of(class).collect();
        let annotations_before = older.annotations_of(class).unwrap_or(&empty);
        let annotations_after = newer.annotations_of(class).unwrap_or(&empty);

        let diff = ClassDiff {
            class: class.clone(),
            added_relations: after.difference(&before).map(|r| (*r).clone()).collect(),
            removed_relations: before.difference(&after).map(|r| (*r).clone()).collect(),
            added_annotations: annotations_after
                .difference(annotations_before)
                .cloned()
                .collect(),
            removed_annotations: annotations_before
                .difference(annotations_after)
                .cloned()
                .collect(),
        };
        if !diff.is_empty() {
            changes.changed_classes.push(diff);
        }
    }

    let labelled = changes
        .new_classes
        .iter()
        .chain(changes.changed_classes.iter().map(|d| &d.class))
        .map(|class| (class, newer))
        .chain(changes.deleted_classes.iter().map(|class| (class, older)));
    let labels: BTreeMap<Iri, BTreeSet<String>> = labelled
        .filter_map(|(class, source)| {
            source
                .labels
                .get(class)
                .map(|labels| (class.clone(), labels.clone()))
        })
        .collect();
    changes.labels = labels;
    changes
}

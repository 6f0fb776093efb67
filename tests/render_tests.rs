//! End-to-end rendering tests: change set in, serialized diff graph out.

use ontodiff::vocab::well_known::RDF_TYPE;
use ontodiff::vocab::{Property, Vocabulary, LEGACY_NAMESPACE, NAMESPACE};
use ontodiff::{
    Annotation, AnnotationValue, ChangeKind, ChangeSet, ChangeSetRenderer, ClassDiff,
    GraphFormat, GraphSerializer, Iri, Relation, RenderError, StatementGraph, VersionId,
    VocabularyVersion,
};
use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::{NamedOrBlankNodeRef, Quad, TermRef};

fn onto(local: &str) -> Iri {
    Iri::new(format!("http://example.org/onto#{local}")).unwrap()
}

fn v1() -> VersionId {
    VersionId::parse("http://example.org/onto/v1").unwrap()
}

fn v2() -> VersionId {
    VersionId::parse("http://example.org/onto/v2").unwrap()
}

fn vocab() -> &'static Vocabulary {
    Vocabulary::get(VocabularyVersion::Current)
}

/// Foo is new; Bar gains Baz as a sub-term.
fn foo_bar_baz() -> ChangeSet {
    ChangeSet::new().with_new_class(onto("Foo")).with_changed_class(
        ClassDiff::new(onto("Bar"))
            .with_added_relation(Relation::sub_class_of(onto("Baz"), onto("Bar"))),
    )
}

fn single_event<'a>(graph: &'a StatementGraph, class: &Iri) -> NamedOrBlankNodeRef<'a> {
    let events = graph.objects(class.as_node().into(), vocab().property(Property::HasChange));
    assert_eq!(events.len(), 1, "expected one event on {class}");
    match events[0] {
        TermRef::BlankNode(node) => node.into(),
        other => panic!("event of {class} is not anonymous: {other}"),
    }
}

fn kind_of(graph: &StatementGraph, event: NamedOrBlankNodeRef<'_>) -> ChangeKind {
    let types = graph.objects(event, RDF_TYPE);
    assert_eq!(types.len(), 1);
    match types[0] {
        TermRef::NamedNode(node) => vocab().kind_of(node).unwrap(),
        other => panic!("unexpected type {other}"),
    }
}

#[test]
fn foo_bar_baz_graph_structure() {
    let rendered = ChangeSetRenderer::default()
        .render(&foo_bar_baz(), &v1(), &v2())
        .unwrap();
    let graph = &rendered.graph;

    let default_graph = graph.default_graph();
    assert_eq!(default_graph.len(), 1);
    assert_eq!(default_graph[0].subject.to_string(), "<http://example.org/onto/v1#>");
    assert_eq!(
        default_graph[0].predicate,
        vocab().property(Property::HasSuccessorVersion)
    );
    assert_eq!(default_graph[0].object.to_string(), "<http://example.org/onto/v2#>");

    let names = graph.graph_names();
    assert_eq!(names.len(), 1);
    assert_eq!(names[0].as_str(), "http://example.org/onto/v2#");

    let foo_event = single_event(graph, &onto("Foo"));
    assert_eq!(kind_of(graph, foo_event), ChangeKind::Addition);

    let bar_event = single_event(graph, &onto("Bar"));
    assert_eq!(kind_of(graph, bar_event), ChangeKind::SubTermAddition);
    let new_terms = graph.objects(bar_event, vocab().property(Property::NewTerm));
    assert_eq!(new_terms, [TermRef::NamedNode(onto("Baz").as_node())]);

    // Baz only appears as the new term
    assert!(graph
        .objects(onto("Baz").as_node().into(), vocab().property(Property::HasChange))
        .is_empty());
    assert_eq!(rendered.summary.total(), 2);
}

#[test]
fn foo_bar_baz_trig_parses_back() {
    let rendered = ChangeSetRenderer::default()
        .render(&foo_bar_baz(), &v1(), &v2())
        .unwrap();
    let bytes = GraphSerializer::new(GraphFormat::TriG)
        .to_bytes(&rendered.graph)
        .unwrap();
    let text = String::from_utf8(bytes.clone()).unwrap();

    assert!(text.contains(&format!("@prefix v: <{NAMESPACE}>")));
    assert!(text.contains("@prefix o1: <http://example.org/onto/v1#>"));
    assert!(text.contains("@prefix o2: <http://example.org/onto/v2#>"));

    let quads: Vec<Quad> = RdfParser::from_format(RdfFormat::TriG)
        .for_slice(&bytes)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(quads.len(), rendered.graph.len());
    // hasChange + type for Foo; hasChange + type + newTerm for Bar; successor link
    assert_eq!(quads.len(), 6);
}

#[test]
fn serialization_is_byte_identical_across_renders() {
    let qux = ClassDiff::new(onto("Qux")).with_added_annotation(Annotation::new(
        Iri::new("http://www.w3.org/2000/01/rdf-schema#label").unwrap(),
        AnnotationValue::language_tagged("Qux", "en"),
    ));
    let changes = foo_bar_baz()
        .with_deleted_class(onto("Old"))
        .with_changed_class(qux);
    let serializer = GraphSerializer::new(GraphFormat::NQuads);
    let render = || {
        let rendered = ChangeSetRenderer::default()
            .render(&changes, &v1(), &v2())
            .unwrap();
        serializer.to_bytes(&rendered.graph).unwrap()
    };
    assert_eq!(render(), render());
}

#[test]
fn legacy_vocabulary_uses_old_namespace() {
    let rendered = ChangeSetRenderer::new(VocabularyVersion::Legacy)
        .render(&foo_bar_baz(), &v1(), &v2())
        .unwrap();
    let legacy = Vocabulary::get(VocabularyVersion::Legacy);

    assert_eq!(rendered.graph.prefix("v"), Some(LEGACY_NAMESPACE));
    let default_graph = rendered.graph.default_graph();
    assert_eq!(
        default_graph[0].predicate,
        legacy.property(Property::HasSuccessorVersion)
    );
    assert!(rendered
        .graph
        .iter()
        .all(|quad| !quad.predicate.as_str().starts_with(NAMESPACE)));
}

#[test]
fn resource_annotation_fails_whole_render() {
    let alt_label = Iri::new("http://www.w3.org/2004/02/skos/core#altLabel").unwrap();
    let qux = ClassDiff::new(onto("Qux")).with_added_annotation(Annotation::new(
        alt_label,
        AnnotationValue::Resource {
            iri: onto("Elsewhere"),
        },
    ));
    let changes = foo_bar_baz().with_changed_class(qux);

    let err = ChangeSetRenderer::default()
        .render(&changes, &v1(), &v2())
        .unwrap_err();
    let RenderError::UnsupportedAnnotationValue { class, .. } = err;
    assert_eq!(class, onto("Qux"));
}

#[test]
fn typed_annotation_keeps_datatype() {
    let label = Iri::new("http://www.w3.org/2000/01/rdf-schema#label").unwrap();
    let date = Iri::new("http://www.w3.org/2001/XMLSchema#date").unwrap();
    let bar = ClassDiff::new(onto("Bar")).with_removed_annotation(Annotation::new(
        label.clone(),
        AnnotationValue::typed("2024-01-01", date.clone()),
    ));
    let changes = ChangeSet::new().with_changed_class(bar);

    let rendered = ChangeSetRenderer::default()
        .render(&changes, &v1(), &v2())
        .unwrap();
    let graph = &rendered.graph;
    let event = single_event(graph, &onto("Bar"));
    assert_eq!(kind_of(graph, event), ChangeKind::LabelDeletion);

    let properties = graph.objects(event, vocab().property(Property::AnnotationProperty));
    assert_eq!(properties, [TermRef::NamedNode(label.as_node())]);
    let values = graph.objects(event, vocab().property(Property::AnnotationValue));
    match values.as_slice() {
        [TermRef::Literal(literal)] => {
            assert_eq!(literal.value(), "2024-01-01");
            assert_eq!(literal.datatype(), date.as_node());
        }
        other => panic!("unexpected annotation values {other:?}"),
    }
}

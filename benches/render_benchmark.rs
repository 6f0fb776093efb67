//! Performance benchmarks for rendering and serializing large change sets.
//!
//! Run with: cargo bench --bench render_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ontodiff::{
    Annotation, AnnotationValue, ChangeSet, ChangeSetRenderer, ClassDiff, GraphFormat,
    GraphSerializer, Iri, Relation, VersionId,
};
use std::hint::black_box;

fn class(index: usize) -> Iri {
    Iri::new(format!("http://example.org/onto#C{index}")).unwrap()
}

/// A change set touching `size` classes: a tenth added, a tenth deleted and
/// the rest changed with one new parent and one relabeling each.
fn generate_change_set(size: usize) -> ChangeSet {
    let label = Iri::new("http://www.w3.org/2000/01/rdf-schema#label").unwrap();
    let mut changes = ChangeSet::new();
    for i in 0..size {
        match i % 10 {
            0 => changes = changes.with_new_class(class(i)),
            1 => changes = changes.with_deleted_class(class(i)),
            _ => {
                let diff = ClassDiff::new(class(i))
                    .with_added_relation(Relation::sub_class_of(class(i), class(i / 2)))
                    .with_removed_annotation(Annotation::new(
                        label.clone(),
                        AnnotationValue::language_tagged(format!("class {i}"), "en"),
                    ))
                    .with_added_annotation(Annotation::new(
                        label.clone(),
                        AnnotationValue::language_tagged(format!("Class {i}"), "en"),
                    ));
                changes = changes.with_changed_class(diff);
            }
        }
    }
    changes
}

fn benchmark_render(c: &mut Criterion) {
    let older = VersionId::parse("http://example.org/onto/v1").unwrap();
    let newer = VersionId::parse("http://example.org/onto/v2").unwrap();
    let renderer = ChangeSetRenderer::default();

    let mut group = c.benchmark_group("render");
    for size in [100, 1_000, 10_000] {
        let changes = generate_change_set(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &changes, |b, changes| {
            b.iter(|| renderer.render(black_box(changes), &older, &newer).unwrap());
        });
    }
    group.finish();
}

fn benchmark_serialize(c: &mut Criterion) {
    let older = VersionId::parse("http://example.org/onto/v1").unwrap();
    let newer = VersionId::parse("http://example.org/onto/v2").unwrap();
    let rendered = ChangeSetRenderer::default()
        .render(&generate_change_set(5_000), &older, &newer)
        .unwrap();

    let mut group = c.benchmark_group("serialize");
    for format in [GraphFormat::TriG, GraphFormat::NQuads] {
        let serializer = GraphSerializer::new(format);
        group.bench_function(BenchmarkId::from_parameter(format), |b| {
            b.iter(|| serializer.to_bytes(black_box(&rendered.graph)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_render, benchmark_serialize);
criterion_main!(benches);

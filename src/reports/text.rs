//! Plain-text diff report.
//!
//! The layout mirrors the long-standing ontology diff text format: a header
//! with counts, then one section each for modified, new and deleted classes.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::compare::Comparison;
use crate::model::{ChangeSet, Iri};
use chrono::Local;
use std::fmt::Write;

const SECTION_RULE: &str = "################";

/// Plain-text reporter
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReporter;

impl TextReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for TextReporter {
    fn generate(
        &self,
        comparison: &Comparison,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let changes = &comparison.changes;
        let summary = changes.summary();
        let date = config
            .metadata
            .generated_at
            .clone()
            .unwrap_or_else(|| Local::now().format("%Y/%m/%d %H:%M:%S").to_string());

        let mut out = String::new();
        writeln!(out, "Ontology Diff Summary")?;
        writeln!(out, "Diff date: {date}")?;
        writeln!(
            out,
            "First ontology URI: {}",
            comparison.older.location.display()
        )?;
        writeln!(
            out,
            "Second ontology URI: {}",
            comparison.newer.location.display()
        )?;
        writeln!(out, "Number of classes changed: {}", summary.classes_changed)?;
        writeln!(out, "Number of classes added: {}", summary.classes_added)?;
        writeln!(out, "Number of classes deleted: {}", summary.classes_deleted)?;
        writeln!(out)?;
        writeln!(out, "Number of class axioms added: {}", summary.relations_added)?;
        writeln!(out, "Number of class axioms deleted: {}", summary.relations_removed)?;
        writeln!(out, "Number of annotations added: {}", summary.annotations_added)?;
        writeln!(out, "Number of annotations deleted: {}", summary.annotations_removed)?;

        let limit = config.max_items.unwrap_or(usize::MAX);

        if !changes.changed_classes.is_empty() {
            section_header(&mut out, "@Classes modified from previous")?;
            for diff in changes.changed_classes.iter().take(limit) {
                class_header(&mut out, changes, &diff.class)?;
                for relation in &diff.removed_relations {
                    writeln!(out, "- {relation}")?;
                }
                for annotation in &diff.removed_annotations {
                    writeln!(out, "- {annotation}")?;
                }
                for relation in &diff.added_relations {
                    writeln!(out, "+ {relation}")?;
                }
                for annotation in &diff.added_annotations {
                    writeln!(out, "+ {annotation}")?;
                }
                writeln!(out)?;
            }
            truncated(&mut out, changes.changed_classes.len(), limit)?;
        }

        if !changes.new_classes.is_empty() {
            section_header(&mut out, "@Classes new to this version")?;
            for class in changes.new_classes.iter().take(limit) {
                class_header(&mut out, changes, class)?;
                writeln!(out)?;
            }
            truncated(&mut out, changes.new_classes.len(), limit)?;
        }

        if !changes.deleted_classes.is_empty() {
            section_header(&mut out, "@Classes deleted from this version")?;
            for class in changes.deleted_classes.iter().take(limit) {
                class_header(&mut out, changes, class)?;
                writeln!(out)?;
            }
            truncated(&mut out, changes.deleted_classes.len(), limit)?;
        }

        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Text
    }
}

fn section_header(out: &mut String, title: &str) -> std::fmt::Result {
    write!(out, "\n{SECTION_RULE}\n{title}\n\n")
}

fn class_header(out: &mut String, changes: &ChangeSet, class: &Iri) -> std::fmt::Result {
    writeln!(out, "Class: {class}")?;
    let labels: Vec<&str> = changes.labels_of(class).collect();
    writeln!(out, "Label(s): {}", labels.join(" "))
}

fn truncated(out: &mut String, total: usize, limit: usize) -> std::fmt::Result {
    if total > limit {
        writeln!(out, "... and {} more", total - limit)?;
    }
    Ok(())
}

//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::compare::Comparison;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

/// Summary reporter for shell output
#[derive(Debug, Clone, Copy)]
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn count_line(&self, lines: &mut Vec<String>, sign: &str, count: usize, what: String) {
        if count == 0 {
            return;
        }
        let color = match sign {
            "+" => "green",
            "-" => "red",
            _ => "yellow",
        };
        lines.push(format!(
            "  {} {what}",
            self.color(&format!("{sign}{count}"), color)
        ));
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(
        &self,
        comparison: &Comparison,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        // Header
        lines.push(self.color("Ontology Diff Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        lines.push(format!(
            "{}  {} → {}",
            self.color("Versions:", "cyan"),
            comparison.older.version,
            comparison.newer.version
        ));
        lines.push(format!(
            "{}  {} → {} classes",
            self.color("Size:", "cyan"),
            comparison.older.class_count,
            comparison.newer.class_count
        ));

        lines.push(String::new());
        lines.push(self.color("Changes:", "bold"));

        let summary = comparison.changes.summary();
        let added = summary.classes_added;
        let deleted = summary.classes_deleted;
        let changed = summary.classes_changed;

        self.count_line(
            &mut lines,
            "+",
            added,
            format!("{} added", plural(added, "class", "classes")),
        );
        self.count_line(
            &mut lines,
            "-",
            deleted,
            format!("{} deleted", plural(deleted, "class", "classes")),
        );
        self.count_line(
            &mut lines,
            "~",
            changed,
            format!("{} modified", plural(changed, "class", "classes")),
        );
        if summary.total_class_changes() == 0 {
            lines.push(format!("  {}", self.color("No changes", "dim")));
        }

        if changed > 0 {
            lines.push(String::new());
            lines.push(self.color("Modified classes:", "bold"));
            self.count_line(
                &mut lines,
                "+",
                summary.relations_added,
                format!(
                    "{} added",
                    plural(summary.relations_added, "axiom", "axioms")
                ),
            );
            self.count_line(
                &mut lines,
                "-",
                summary.relations_removed,
                format!(
                    "{} deleted",
                    plural(summary.relations_removed, "axiom", "axioms")
                ),
            );
            self.count_line(
                &mut lines,
                "+",
                summary.annotations_added,
                format!(
                    "{} added",
                    plural(summary.annotations_added, "annotation", "annotations")
                ),
            );
            self.count_line(
                &mut lines,
                "-",
                summary.annotations_removed,
                format!(
                    "{} deleted",
                    plural(summary.annotations_removed, "annotation", "annotations")
                ),
            );
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

//! Pipeline orchestration for version sequences.
//!
//! discover → (compare → render → serialize → report) per consecutive pair,
//! shared by the `sequence` and `diff` command handlers.

mod discover;
mod output;
mod pair_stage;
mod sequence;

pub use discover::{artifact_name, discover_versions, report_name, version_pairs};
pub use output::{should_use_color, write_output, OutputTarget};
pub use pair_stage::{diff_pair, run_pair, PairDiff, PairOutcome};
pub use sequence::{run_sequence, SequenceOutcome};

use crate::error::OntoDiffError;
use std::path::PathBuf;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Fewer than two files matched the discovery filter
    #[error("Need at least two ontology versions in {}, found {found}", dir.display())]
    NotEnoughVersions { dir: PathBuf, found: usize },

    /// The base directory could not be listed
    #[error("Cannot list ontology versions in {}: {source}", dir.display())]
    Discovery {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact directory could not be created
    #[error("Cannot create output directory {}: {source}", dir.display())]
    OutputDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A version pair failed; the run stopped there
    #[error("Pair {} → {} failed: {source}", older.display(), newer.display())]
    Pair {
        older: PathBuf,
        newer: PathBuf,
        #[source]
        source: OntoDiffError,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected (or fail-on-change not set)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected (only with fail-on-change)
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

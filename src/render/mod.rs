//! Rendering of change sets into statement graphs under the versioning vocabulary.
//!
//! The renderer is the only place where comparison output becomes graph
//! statements. For each version pair it produces:
//!
//! - the successor link `older → newer`, the only statement outside any sub-graph
//! - one anonymous change event per detected change, typed with exactly one
//!   [`ChangeKind`](crate::vocab::ChangeKind), inside the sub-graph named after
//!   the newer version
//!
//! Structural relations that do not involve their class are skipped and
//! reported through [`RenderedDiff::inconsistencies`]. Annotation values that
//! cannot be expressed as literals fail the whole call with [`RenderError`].

mod builder;
mod renderer;

pub use builder::{GraphBuilder, StatementGraph};
pub use renderer::{
    ChangeSetRenderer, RenderError, RenderSummary, RenderedDiff, StructuralInconsistency,
    NEWER_PREFIX, OLDER_PREFIX,
};

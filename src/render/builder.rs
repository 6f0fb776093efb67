//! Accumulate-then-freeze assembly of statement graphs.

use indexmap::IndexMap;
use oxigraph::model::{
    Dataset, GraphName, GraphNameRef, NamedNode, NamedNodeRef, NamedOrBlankNode,
    NamedOrBlankNodeRef, Quad, QuadRef, Term, TermRef,
};

/// Mutable buffer of quads and prefix bindings.
///
/// Only the renderer holds a builder; callers only ever see the frozen
/// [`StatementGraph`] returned by [`GraphBuilder::freeze`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    prefixes: IndexMap<String, String>,
    quads: Vec<Quad>,
}

impl GraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `prefix` to `namespace`. Rebinding a prefix replaces its namespace
    /// but keeps its original position.
    pub fn bind_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Append one statement.
    pub fn add(
        &mut self,
        subject: impl Into<NamedOrBlankNode>,
        predicate: impl Into<NamedNode>,
        object: impl Into<Term>,
        graph: impl Into<GraphName>,
    ) {
        self.quads.push(Quad::new(subject, predicate, object, graph));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Convert the buffer into an immutable graph.
    #[must_use]
    pub fn freeze(self) -> StatementGraph {
        let mut dataset = Dataset::new();
        for quad in &self.quads {
            dataset.insert(quad);
        }
        StatementGraph {
            dataset,
            prefixes: self.prefixes,
        }
    }
}

/// An immutable set of statements partitioned into the default graph and
/// named sub-graphs, together with the namespace bindings used to write it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementGraph {
    dataset: Dataset,
    prefixes: IndexMap<String, String>,
}

impl StatementGraph {
    /// Number of distinct statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = QuadRef<'_>> {
        self.dataset.iter()
    }

    /// Prefix bindings in insertion order.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(prefix, namespace)| (prefix.as_str(), namespace.as_str()))
    }

    #[must_use]
    pub fn prefix(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Statements asserted outside any named sub-graph.
    #[must_use]
    pub fn default_graph(&self) -> Vec<QuadRef<'_>> {
        self.in_graph(GraphNameRef::DefaultGraph)
    }

    /// Statements asserted within the sub-graph `name`.
    #[must_use]
    pub fn named_graph(&self, name: NamedNodeRef<'_>) -> Vec<QuadRef<'_>> {
        self.in_graph(GraphNameRef::NamedNode(name))
    }

    /// Names of all non-empty sub-graphs, sorted.
    #[must_use]
    pub fn graph_names(&self) -> Vec<NamedNodeRef<'_>> {
        let mut names: Vec<_> = self
            .dataset
            .iter()
            .filter_map(|quad| match quad.graph_name {
                GraphNameRef::NamedNode(name) => Some(name),
                _ => None,
            })
            .collect();
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        names.dedup();
        names
    }

    /// Objects of every statement with the given subject and predicate, in any graph.
    #[must_use]
    pub fn objects(
        &self,
        subject: NamedOrBlankNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
    ) -> Vec<TermRef<'_>> {
        self.dataset
            .iter()
            .filter(|quad| quad.subject == subject && quad.predicate == predicate)
            .map(|quad| quad.object)
            .collect()
    }

    fn in_graph(&self, graph: GraphNameRef<'_>) -> Vec<QuadRef<'_>> {
        self.dataset
            .iter()
            .filter(|quad| quad.graph_name == graph)
            .collect()
    }
}

//! Encoding statement graphs into quad syntaxes and writing them to disk.

use crate::render::StatementGraph;
use clap::ValueEnum;
use oxigraph::io::{RdfFormat, RdfSerializer};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors from encoding or writing a statement graph.
#[derive(Error, Debug)]
pub enum SerializeError {
    #[error("invalid prefix binding {prefix}: <{namespace}>: {reason}")]
    InvalidPrefix {
        prefix: String,
        namespace: String,
        reason: String,
    },

    #[error("failed to write graph to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode graph: {0}")]
    Encode(#[from] io::Error),
}

/// Quad-capable output syntaxes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    /// TriG, with prefix declarations
    #[default]
    #[value(name = "trig")]
    TriG,
    /// N-Quads, one statement per line
    #[value(name = "nquads")]
    NQuads,
}

impl GraphFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::TriG => "trig",
            Self::NQuads => "nq",
        }
    }

    const fn rdf_format(self) -> RdfFormat {
        match self {
            Self::TriG => RdfFormat::TriG,
            Self::NQuads => RdfFormat::NQuads,
        }
    }
}

impl std::fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TriG => write!(f, "trig"),
            Self::NQuads => write!(f, "nquads"),
        }
    }
}

/// Writes [`StatementGraph`]s in one [`GraphFormat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphSerializer {
    format: GraphFormat,
}

impl GraphSerializer {
    #[must_use]
    pub const fn new(format: GraphFormat) -> Self {
        Self { format }
    }

    #[must_use]
    pub const fn format(&self) -> GraphFormat {
        self.format
    }

    /// Encode `graph` into `writer`.
    ///
    /// Prefix bindings are declared for syntaxes that support them.
    ///
    /// # Errors
    ///
    /// Fails on an unusable prefix binding or when the writer fails.
    pub fn write<W: Write>(&self, graph: &StatementGraph, writer: W) -> Result<W, SerializeError> {
        let mut serializer = RdfSerializer::from_format(self.format.rdf_format());
        if self.format == GraphFormat::TriG {
            for (prefix, namespace) in graph.prefixes() {
                serializer = serializer.with_prefix(prefix, namespace).map_err(|e| {
                    SerializeError::InvalidPrefix {
                        prefix: prefix.to_string(),
                        namespace: namespace.to_string(),
                        reason: e.to_string(),
                    }
                })?;
            }
        }

        let mut quads: Vec<_> = graph.iter().collect();
        // Dataset iteration order is unspecified.
        quads.sort_by_cached_key(|quad| {
            (
                quad.graph_name.to_string(),
                quad.subject.to_string(),
                quad.predicate.to_string(),
                quad.object.to_string(),
            )
        });

        let mut out = serializer.for_writer(writer);
        for quad in quads {
            out.serialize_quad(quad)?;
        }
        Ok(out.finish()?)
    }

    /// Encode `graph` into a byte buffer.
    ///
    /// # Errors
    ///
    /// Fails on an unusable prefix binding.
    pub fn to_bytes(&self, graph: &StatementGraph) -> Result<Vec<u8>, SerializeError> {
        self.write(graph, Vec::new())
    }

    /// Write `graph` to `path`.
    ///
    /// The graph is written to a sibling temporary file which is renamed over
    /// `path` only after a complete write, so a failure never leaves a partial
    /// artifact behind.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::Write`] with the target path on any IO failure.
    pub fn write_file(&self, graph: &StatementGraph, path: &Path) -> Result<(), SerializeError> {
        let tmp = temp_path(path);
        let write_err = |source| SerializeError::Write {
            path: path.to_path_buf(),
            source,
        };

        let result = File::create(&tmp)
            .map_err(write_err)
            .and_then(|file| self.write(graph, BufWriter::new(file)))
            .and_then(|writer| {
                writer
                    .into_inner()
                    .map_err(|e| write_err(e.into_error()))
                    .and_then(|file| file.sync_all().map_err(write_err))
            })
            .and_then(|()| fs::rename(&tmp, path).map_err(write_err));

        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        } else {
            debug!(path = %path.display(), statements = graph.len(), "wrote graph");
        }
        result
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

//! Graph accumulation and Turtle serialization.
//!
//! The accumulator wraps an [`oxrdf::Graph`], which is a set: inserting an
//! identical statement twice is a no-op, so duplicate emissions (e.g. the
//! same department minted from several courses) dedupe naturally.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use oxrdf::{Graph, GraphNameRef, NamedNode, Term, Triple};
use oxrdfio::{RdfFormat, RdfSerializer};
use tempfile::NamedTempFile;

use crate::config::GRAPH_PREFIX;
use crate::vocab::Namespace;

/// Accumulates statements for one converter run, with a single registered
/// namespace-prefix binding for serialization readability.
pub struct GraphBuilder {
    graph: Graph,
    namespace: Namespace,
}

impl GraphBuilder {
    pub fn new(namespace: Namespace) -> Self {
        Self {
            graph: Graph::default(),
            namespace,
        }
    }

    pub fn insert(&mut self, subject: &NamedNode, predicate: impl Into<NamedNode>, object: impl Into<Term>) {
        self.graph
            .insert(&Triple::new(subject.clone(), predicate, object));
    }

    /// Number of distinct statements accumulated so far.
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Serialize the graph as Turtle, creating parent directories as needed.
    /// The file is written to a temporary sibling first and renamed into
    /// place, so a failed run never leaves a truncated dump. Returns the
    /// number of statements written.
    pub fn write_turtle(&self, path: &Path) -> Result<usize> {
        let mut serializer = RdfSerializer::from_format(RdfFormat::Turtle)
            .with_prefix(GRAPH_PREFIX, self.namespace.as_str())
            .context("namespace is not a valid prefix IRI")?
            .for_writer(Vec::new());
        for triple in self.graph.iter() {
            serializer.serialize_quad(triple.in_graph(GraphNameRef::DefaultGraph))?;
        }
        let bytes = serializer.finish()?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
                parent
            }
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in: {}", dir.display()))?;
        tmp.write_all(&bytes)?;
        tmp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;

        Ok(self.graph.len())
    }
}

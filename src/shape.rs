//! Shapes SPARQL JSON result tables for display.
//!
//! The external engine returns variable bindings where each value carries a
//! kind marker (`uri`, `literal`, ...). Resource identifiers are collapsed
//! to their local name; literals pass through untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// SPARQL JSON results document, as returned by the engine. Fields default
/// so an ASK result (no `results` section) still deserializes.
#[derive(Debug, Default, Deserialize)]
pub struct SparqlJson {
    #[serde(default)]
    pub head: Head,
    #[serde(default)]
    pub results: ResultsSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct Head {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResultsSection {
    #[serde(default)]
    pub bindings: Vec<BindingRow>,
}

/// One result row. `IndexMap` keeps the engine's variable order.
pub type BindingRow = IndexMap<String, BindingValue>;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BindingValue {
    /// Value-kind marker: `uri` for resource identifiers, anything else is
    /// treated as a plain literal.
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

/// Display-ready result table.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct ShapedResults {
    pub variables: Vec<String>,
    pub rows: Vec<IndexMap<String, String>>,
    pub count: usize,
}

/// Collapse every resource identifier in the bindings to its local name.
/// An empty binding list yields an empty result with no variables.
pub fn shape(results: &SparqlJson) -> ShapedResults {
    let bindings = &results.results.bindings;
    let variables: Vec<String> = bindings
        .first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default();

    let rows: Vec<IndexMap<String, String>> = bindings
        .iter()
        .map(|binding| {
            binding
                .iter()
                .map(|(var, value)| {
                    let display = if value.kind == "uri" {
                        local_name(&value.value).to_string()
                    } else {
                        value.value.clone()
                    };
                    (var.clone(), display)
                })
                .collect()
        })
        .collect();

    ShapedResults {
        count: rows.len(),
        variables,
        rows,
    }
}

/// The trailing segment of a resource identifier: after the last `#`, or
/// for an absolute IRI without a fragment, after the last `/`. Already-local
/// values come back unchanged, so shaping is idempotent.
pub fn local_name(value: &str) -> &str {
    if let Some((_, fragment)) = value.rsplit_once('#') {
        return fragment;
    }
    if value.contains("://") {
        if let Some((_, segment)) = value.rsplit_once('/') {
            return segment;
        }
    }
    value
}

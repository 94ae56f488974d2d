//! Tabular extractor: student contact rows from a CSV file.
//!
//! Format decoding only. Rows become [`StudentRecord`]s; a single
//! `full_name` column is split into first/last name, and empty cells count
//! as absent so they emit no triples.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::config::{DEFAULT_BASE_IRI, DEFAULT_CSV_OUTPUT, DEFAULT_CSV_SOURCE};
use crate::emit::emit_student;
use crate::graph::GraphBuilder;
use crate::models::{non_blank, split_full_name, StudentRecord};
use crate::vocab::Namespace;

#[derive(Debug, Clone)]
pub struct CsvConfig {
    pub csv: PathBuf,
    pub output: PathBuf,
    pub base_iri: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            csv: PathBuf::from(DEFAULT_CSV_SOURCE),
            output: PathBuf::from(DEFAULT_CSV_OUTPUT),
            base_iri: DEFAULT_BASE_IRI.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContactRow {
    student_id: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl ContactRow {
    fn into_record(self) -> StudentRecord {
        let (first_name, last_name) = self
            .full_name
            .as_deref()
            .map(split_full_name)
            .unwrap_or((None, None));
        StudentRecord {
            id: self.student_id,
            first_name,
            last_name,
            email: non_blank(self.email.as_deref()),
            phone: non_blank(self.phone.as_deref()),
            country: non_blank(self.country.as_deref()),
            ..Default::default()
        }
    }
}

/// Convert the contacts CSV into a Turtle dump. Returns the number of
/// statements written.
pub fn run_conversion(config: &CsvConfig) -> Result<usize> {
    if !config.csv.exists() {
        bail!("{} not found. Ensure the CSV exists.", config.csv.display());
    }

    let ns = Namespace::new(&config.base_iri);
    let mut graph = GraphBuilder::new(ns.clone());

    let mut reader = csv::Reader::from_path(&config.csv)
        .with_context(|| format!("Failed to open CSV source: {}", config.csv.display()))?;

    let mut rows = 0u64;
    for row in reader.deserialize::<ContactRow>() {
        let row = row.context("Malformed contact row")?;
        if row.student_id.trim().is_empty() {
            bail!("Contact row {} has no student_id", rows + 1);
        }
        emit_student(&mut graph, &ns, &row.into_record());
        rows += 1;
    }

    info!(rows, statements = graph.len(), "CSV source converted");
    graph.write_turtle(&config.output)
}

//! Unigraph: cross-source RDF integration for university data
//!
//! This crate turns three heterogeneous sources -- a contacts CSV, a SQLite
//! database, and an XML course catalog -- into one RDF graph under a shared
//! ontology, and fronts the external SPARQL engine with a small query proxy:
//!
//! 1. **Extract** -- each source module decodes its format into typed entity
//!    records (students, courses, departments, enrollments)
//! 2. **Emit** -- records become RDF statements: a type assertion, literal
//!    triples for present attributes only, and relationship triples
//! 3. **Accumulate & serialize** -- statements collect in a set-backed graph
//!    (identical statements dedupe) and are written atomically as Turtle
//! 4. **Query** -- the proxy forwards SPARQL to the external engine and
//!    shapes the returned variable bindings for display
//!
//! # Architecture
//!
//! Converters are single-threaded batch jobs: open source, stream records,
//! accumulate, serialize, exit. Each run fully regenerates its output file.
//! Identifier minting is deterministic, so re-running a converter against
//! unchanged data reproduces identical identifiers. Entities minted from
//! different sources are never unified; cross-source joins happen at query
//! time on matching literal values.
//!
//! # Key Modules
//!
//! - [`vocab`] -- namespace canonicalization, ontology terms, identifier
//!   minting (slugged department keys, `Unknown` placeholders)
//! - [`models`] -- typed per-source records and ordered key-fallback policies
//! - [`csv_source`], [`sqlite_source`], [`xml_source`] -- format extractors
//! - [`emit`] -- record-to-triples mapping with datatype tagging
//! - [`graph`] -- statement accumulator and atomic Turtle serializer
//! - [`shape`] -- SPARQL JSON result shaping (local-name display)
//! - [`server`] -- axum query proxy (`/api/query`, `/api/health`,
//!   `/api/examples`)
//! - [`config`] -- defaults for paths, namespace, endpoint
//!
//! # Example Usage
//!
//! ```bash
//! # Convert each source into a Turtle dump
//! unigraph csv --csv student_contacts.csv --output data/csv_dump.ttl
//! unigraph sqlite --db university.db --output data/sqlite_dump.ttl
//! unigraph xml --xml course_catalog.xml --output data/xml_dump.ttl
//!
//! # Front the SPARQL engine with the query proxy
//! unigraph serve --endpoint http://localhost:3030/university/query
//! ```

pub mod config;
pub mod csv_source;
pub mod emit;
pub mod graph;
pub mod models;
pub mod server;
pub mod shape;
pub mod sqlite_source;
pub mod vocab;
pub mod xml_source;

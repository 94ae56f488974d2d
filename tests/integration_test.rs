//! End-to-end tests for the three converters.
//!
//! Each test builds a real source fixture in a TempDir, runs the converter,
//! and re-parses the Turtle output to validate statement counts and the
//! exact triples emitted. Reloading through the Turtle parser also covers
//! the round-trip property: no statement is lost or duplicated on the way
//! to disk.

use std::fs;
use std::io::BufReader;
use std::path::Path;

use oxrdf::vocab::{rdf, xsd};
use oxrdf::{Graph, Literal, Term, Triple, TripleRef};
use oxrdfio::{RdfFormat, RdfParser};
use tempfile::TempDir;
use unigraph::csv_source::{self, CsvConfig};
use unigraph::sqlite_source::{self, SqliteConfig};
use unigraph::vocab::Namespace;
use unigraph::xml_source::{self, XmlConfig};

const BASE_IRI: &str = "http://example.org/university#";

/// Reload a Turtle dump into an in-memory graph.
fn reload(path: &Path) -> Graph {
    let file = fs::File::open(path).unwrap();
    let mut graph = Graph::default();
    for quad in RdfParser::from_format(RdfFormat::Turtle).for_reader(BufReader::new(file)) {
        let quad = quad.unwrap();
        graph.insert(&Triple::new(quad.subject, quad.predicate, quad.object));
    }
    graph
}

fn ns() -> Namespace {
    Namespace::new(BASE_IRI)
}

// --- CSV converter -------------------------------------------------------

fn write_contacts(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("student_contacts.csv");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn csv_row_emits_expected_triples() {
    let dir = TempDir::new().unwrap();
    let csv = write_contacts(
        &dir,
        "student_id,full_name,email,phone,country\nS1,Ada Lovelace,a@x.edu,,\n",
    );
    let config = CsvConfig {
        csv,
        output: dir.path().join("csv_dump.ttl"),
        base_iri: BASE_IRI.to_string(),
    };

    let written = csv_source::run_conversion(&config).unwrap();
    assert_eq!(written, 4);

    let graph = reload(&config.output);
    assert_eq!(graph.len(), written, "round-trip changed statement count");

    let ns = ns();
    let student = ns.student("S1");
    assert!(graph.contains(TripleRef::new(
        &student,
        rdf::TYPE,
        &Term::from(ns.class_student())
    )));
    assert!(graph.contains(TripleRef::new(
        &student,
        &ns.first_name(),
        &Term::from(Literal::new_simple_literal("Ada"))
    )));
    assert!(graph.contains(TripleRef::new(
        &student,
        &ns.last_name(),
        &Term::from(Literal::new_simple_literal("Lovelace"))
    )));
    assert!(graph.contains(TripleRef::new(
        &student,
        &ns.email(),
        &Term::from(Literal::new_simple_literal("a@x.edu"))
    )));
}

#[test]
fn csv_name_without_space_has_no_last_name() {
    let dir = TempDir::new().unwrap();
    let csv = write_contacts(&dir, "student_id,full_name,email\nS2,Cher,c@x.edu\n");
    let config = CsvConfig {
        csv,
        output: dir.path().join("csv_dump.ttl"),
        base_iri: BASE_IRI.to_string(),
    };

    // type + firstName + email, no lastName
    assert_eq!(csv_source::run_conversion(&config).unwrap(), 3);

    let graph = reload(&config.output);
    let ns = ns();
    assert!(graph.contains(TripleRef::new(
        &ns.student("S2"),
        &ns.first_name(),
        &Term::from(Literal::new_simple_literal("Cher"))
    )));
    assert!(!graph
        .iter()
        .any(|t| t.predicate == ns.last_name().as_ref()));
}

#[test]
fn csv_converter_is_deterministic_across_runs() {
    let dir = TempDir::new().unwrap();
    let csv = write_contacts(
        &dir,
        "student_id,full_name,email\nS1,Ada Lovelace,a@x.edu\nS2,Grace Hopper,g@x.edu\n",
    );
    let first = CsvConfig {
        csv: csv.clone(),
        output: dir.path().join("first.ttl"),
        base_iri: BASE_IRI.to_string(),
    };
    let second = CsvConfig {
        csv,
        output: dir.path().join("second.ttl"),
        base_iri: BASE_IRI.to_string(),
    };

    assert_eq!(
        csv_source::run_conversion(&first).unwrap(),
        csv_source::run_conversion(&second).unwrap()
    );
    let a = reload(&first.output);
    let b = reload(&second.output);
    assert_eq!(a.len(), b.len());
    assert!(a.iter().all(|t| b.contains(t)));
}

// --- SQLite converter ----------------------------------------------------

fn create_university_db(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("university.db");
    let conn = rusqlite::Connection::open(&path).unwrap();
    // `credits` and `year` columns are typeless on purpose so fixture rows
    // can carry non-integer values that must be skipped.
    conn.execute_batch(
        r#"
        CREATE TABLE Students (
            student_id INTEGER PRIMARY KEY,
            first_name TEXT, last_name TEXT, date_of_birth TEXT, major TEXT
        );
        CREATE TABLE Courses (
            course_id INTEGER PRIMARY KEY,
            course_code TEXT, course_title TEXT, department TEXT, credits
        );
        CREATE TABLE Enrollments (
            enrollment_id INTEGER PRIMARY KEY,
            student_id INTEGER, course_id INTEGER, semester TEXT, year, grade TEXT
        );
        INSERT INTO Students VALUES (1, 'Ada', 'Lovelace', '1815-12-10', 'Mathematics');
        INSERT INTO Students VALUES (2, 'Grace', 'Hopper', NULL, NULL);
        INSERT INTO Courses VALUES (101, 'CS101', 'Intro to Computing', 'Computer Science', 3);
        INSERT INTO Courses VALUES (102, 'CS102', 'Data Structures', 'Computer Science', 'three');
        INSERT INTO Enrollments VALUES (9, 1, 101, 'Fall', 2024, 'A');
        INSERT INTO Enrollments VALUES (10, 2, 102, 'Spring', 'TBD', NULL);
        "#,
    )
    .unwrap();
    path
}

#[test]
fn sqlite_conversion_covers_all_three_tables() {
    let dir = TempDir::new().unwrap();
    let config = SqliteConfig {
        db: create_university_db(&dir),
        output: dir.path().join("sqlite_dump.ttl"),
        base_iri: BASE_IRI.to_string(),
    };

    // Students: 5 + 3. Courses: 7 (incl. inline department) + 4 (shared
    // department dedupes). Enrollments: 6 + 4.
    let written = sqlite_source::run_conversion(&config).unwrap();
    assert_eq!(written, 29);

    let graph = reload(&config.output);
    assert_eq!(graph.len(), written);

    let ns = ns();
    let dept = ns.department("Computer Science");
    assert!(graph.contains(TripleRef::new(
        &dept,
        &ns.department_name(),
        &Term::from(Literal::new_simple_literal("Computer Science"))
    )));
    assert!(graph.contains(TripleRef::new(
        &ns.course("101"),
        &ns.offered_by_department(),
        &Term::from(dept)
    )));
    assert!(graph.contains(TripleRef::new(
        &ns.student("1"),
        &ns.has_enrollment(),
        &Term::from(ns.enrollment("9"))
    )));
    assert!(graph.contains(TripleRef::new(
        &ns.enrollment("9"),
        &ns.enrolled_in_course(),
        &Term::from(ns.course("101"))
    )));
}

#[test]
fn sqlite_numeric_fields_keep_integer_datatype_or_vanish() {
    let dir = TempDir::new().unwrap();
    let config = SqliteConfig {
        db: create_university_db(&dir),
        output: dir.path().join("sqlite_dump.ttl"),
        base_iri: BASE_IRI.to_string(),
    };
    sqlite_source::run_conversion(&config).unwrap();

    let graph = reload(&config.output);
    let ns = ns();

    // Integer year comes back typed.
    assert!(graph.contains(TripleRef::new(
        &ns.enrollment("9"),
        &ns.year(),
        &Term::from(Literal::new_typed_literal("2024", xsd::INTEGER))
    )));
    // Text year on enrollment 10 was skipped.
    assert!(!graph
        .iter()
        .any(|t| t.subject == ns.enrollment("10").as_ref().into()
            && t.predicate == ns.year().as_ref()));
    // Text credits on course 102 was skipped.
    assert!(!graph
        .iter()
        .any(|t| t.subject == ns.course("102").as_ref().into()
            && t.predicate == ns.credits().as_ref()));
    // Date of birth carried the date datatype.
    assert!(graph.contains(TripleRef::new(
        &ns.student("1"),
        &ns.date_of_birth(),
        &Term::from(Literal::new_typed_literal("1815-12-10", xsd::DATE))
    )));
}

#[test]
fn sqlite_missing_database_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let config = SqliteConfig {
        db: dir.path().join("absent.db"),
        output: dir.path().join("sqlite_dump.ttl"),
        base_iri: BASE_IRI.to_string(),
    };
    assert!(sqlite_source::run_conversion(&config).is_err());
    assert!(!config.output.exists());
}

// --- XML converter -------------------------------------------------------

const CATALOG: &str = r#"<catalog>
  <department code="CS" name="Computer Science">
    <course>
      <courseCode>CS101</courseCode>
      <title>Intro</title>
      <credits>3</credits>
    </course>
    <course>
      <title>Seminar</title>
      <credits>12x</credits>
    </course>
  </department>
  <department name="No Code Dept">
    <course></course>
  </department>
</catalog>"#;

#[test]
fn xml_conversion_applies_fallback_chain_and_digit_guard() {
    let dir = TempDir::new().unwrap();
    let xml = dir.path().join("course_catalog.xml");
    fs::write(&xml, CATALOG).unwrap();
    let config = XmlConfig {
        xml,
        output: dir.path().join("xml_dump.ttl"),
        base_iri: BASE_IRI.to_string(),
    };

    let written = xml_source::run_conversion(&config).unwrap();
    let graph = reload(&config.output);
    assert_eq!(graph.len(), written);

    let ns = ns();

    // Course keyed by code, with integer credits.
    assert!(graph.contains(TripleRef::new(
        &ns.course("CS101"),
        &ns.credits(),
        &Term::from(Literal::new_typed_literal("3", xsd::INTEGER))
    )));
    // Course keyed by title fallback; its "12x" credits never appear.
    let seminar = ns.course("Seminar");
    assert!(graph.contains(TripleRef::new(
        &seminar,
        rdf::TYPE,
        &Term::from(ns.class_course())
    )));
    assert!(!graph
        .iter()
        .any(|t| t.subject == seminar.as_ref().into() && t.predicate == ns.credits().as_ref()));
    // Department without a code collapses to the Unknown placeholder, and
    // the blank course under it to the course placeholder.
    assert!(graph.contains(TripleRef::new(
        &ns.department(""),
        &ns.department_name(),
        &Term::from(Literal::new_simple_literal("No Code Dept"))
    )));
    assert!(graph.contains(TripleRef::new(
        &ns.course("Unknown"),
        &ns.offered_by_department(),
        &Term::from(ns.department(""))
    )));
    // Both courses link back to the CS department.
    assert!(graph.contains(TripleRef::new(
        &ns.course("CS101"),
        &ns.offered_by_department(),
        &Term::from(ns.department("CS"))
    )));
    assert!(graph.contains(TripleRef::new(
        &seminar,
        &ns.offered_by_department(),
        &Term::from(ns.department("CS"))
    )));
}

#[test]
fn xml_missing_source_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let config = XmlConfig {
        xml: dir.path().join("absent.xml"),
        output: dir.path().join("xml_dump.ttl"),
        base_iri: BASE_IRI.to_string(),
    };
    assert!(xml_source::run_conversion(&config).is_err());
    assert!(!config.output.exists());
}

#[test]
fn base_iri_without_separator_is_canonicalized() {
    let dir = TempDir::new().unwrap();
    let csv = write_contacts(&dir, "student_id,full_name\nS1,Ada Lovelace\n");
    let config = CsvConfig {
        csv,
        output: dir.path().join("csv_dump.ttl"),
        base_iri: "http://example.org/university".to_string(),
    };
    csv_source::run_conversion(&config).unwrap();

    let graph = reload(&config.output);
    let ns = Namespace::new("http://example.org/university#");
    assert!(graph.contains(TripleRef::new(
        &ns.student("S1"),
        rdf::TYPE,
        &Term::from(ns.class_student())
    )));
}

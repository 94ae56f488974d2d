//! Relational extractor: students, courses, and enrollments from SQLite.
//!
//! Three read-only queries, streamed row by row. Numeric columns go through
//! [`ValueRef`] before they may become integer-typed literals: a credits or
//! year value stored as anything but an SQLite integer is omitted rather
//! than emitted with the wrong datatype.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};
use tracing::info;

use crate::config::{DEFAULT_BASE_IRI, DEFAULT_DB_OUTPUT, DEFAULT_DB_SOURCE};
use crate::emit::{emit_course, emit_enrollment, emit_student};
use crate::graph::GraphBuilder;
use crate::models::{
    non_blank, CourseKey, CourseRecord, DepartmentKey, DepartmentRecord, EnrollmentRecord,
    StudentRecord,
};
use crate::vocab::Namespace;

#[derive(Debug, Clone)]
pub struct SqliteConfig {
    pub db: PathBuf,
    pub output: PathBuf,
    pub base_iri: String,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            db: PathBuf::from(DEFAULT_DB_SOURCE),
            output: PathBuf::from(DEFAULT_DB_OUTPUT),
            base_iri: DEFAULT_BASE_IRI.to_string(),
        }
    }
}

/// Convert the university database into a Turtle dump. The connection is
/// scoped to this call and released on every exit path. Returns the number
/// of statements written.
pub fn run_conversion(config: &SqliteConfig) -> Result<usize> {
    if !config.db.exists() {
        bail!(
            "{} does not exist. Create the database before converting.",
            config.db.display()
        );
    }

    let ns = Namespace::new(&config.base_iri);
    let mut graph = GraphBuilder::new(ns.clone());

    let conn = Connection::open_with_flags(&config.db, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .with_context(|| format!("Failed to open database: {}", config.db.display()))?;

    export_students(&conn, &mut graph, &ns)?;
    export_courses(&conn, &mut graph, &ns)?;
    export_enrollments(&conn, &mut graph, &ns)?;
    drop(conn);

    info!(statements = graph.len(), "SQLite source converted");
    graph.write_turtle(&config.output)
}

/// Read a column as an integer, or `None` for any other storage class.
fn integer_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<i64>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Integer(v) => Some(v),
        _ => None,
    })
}

fn text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    let value: Option<String> = row.get(idx)?;
    Ok(non_blank(value.as_deref()))
}

fn export_students(conn: &Connection, graph: &mut GraphBuilder, ns: &Namespace) -> Result<()> {
    let mut stmt = conn
        .prepare("SELECT student_id, first_name, last_name, date_of_birth, major FROM Students")
        .context("Failed to query Students")?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let record = StudentRecord {
            id: row.get::<_, i64>(0)?.to_string(),
            first_name: text_column(row, 1)?,
            last_name: text_column(row, 2)?,
            date_of_birth: text_column(row, 3)?,
            major: text_column(row, 4)?,
            ..Default::default()
        };
        emit_student(graph, ns, &record);
    }
    Ok(())
}

fn export_courses(conn: &Connection, graph: &mut GraphBuilder, ns: &Namespace) -> Result<()> {
    let mut stmt = conn
        .prepare("SELECT course_id, course_code, course_title, department, credits FROM Courses")
        .context("Failed to query Courses")?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let department = text_column(row, 3)?.map(|name| DepartmentRecord {
            key: DepartmentKey::Name(name.clone()),
            code: None,
            name: Some(name),
        });
        let record = CourseRecord {
            key: CourseKey::Id(row.get(0)?),
            code: text_column(row, 1)?,
            title: text_column(row, 2)?,
            credits: integer_column(row, 4)?,
            department,
        };
        emit_course(graph, ns, &record);
    }
    Ok(())
}

fn export_enrollments(conn: &Connection, graph: &mut GraphBuilder, ns: &Namespace) -> Result<()> {
    let mut stmt = conn
        .prepare(
            "SELECT enrollment_id, student_id, course_id, semester, year, grade FROM Enrollments",
        )
        .context("Failed to query Enrollments")?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let record = EnrollmentRecord {
            id: row.get(0)?,
            student_id: row.get(1)?,
            course_id: row.get(2)?,
            semester: text_column(row, 3)?,
            year: integer_column(row, 4)?,
            grade: text_column(row, 5)?,
        };
        emit_enrollment(graph, ns, &record);
    }
    Ok(())
}

//! Hierarchical extractor: departments and nested courses from the XML
//! catalog.
//!
//! Event-based walk over `<department code="..." name="...">` elements with
//! nested `<course><courseCode/><title/><credits/></course>` children. A
//! course key resolves through the ordered fallback chain code -> title ->
//! `Unknown`; credits must be a pure digit string to be kept.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::info;

use crate::config::{DEFAULT_BASE_IRI, DEFAULT_XML_OUTPUT, DEFAULT_XML_SOURCE};
use crate::emit::{emit_course, emit_department};
use crate::graph::GraphBuilder;
use crate::models::{non_blank, CourseKey, CourseRecord, DepartmentKey, DepartmentRecord};
use crate::vocab::Namespace;

#[derive(Debug, Clone)]
pub struct XmlConfig {
    pub xml: PathBuf,
    pub output: PathBuf,
    pub base_iri: String,
}

impl Default for XmlConfig {
    fn default() -> Self {
        Self {
            xml: PathBuf::from(DEFAULT_XML_SOURCE),
            output: PathBuf::from(DEFAULT_XML_OUTPUT),
            base_iri: DEFAULT_BASE_IRI.to_string(),
        }
    }
}

/// One department element with its nested courses, decoded but not yet
/// mapped to RDF.
#[derive(Debug, Default)]
struct DepartmentEntry {
    code: Option<String>,
    name: Option<String>,
    courses: Vec<CourseEntry>,
}

#[derive(Debug, Default)]
struct CourseEntry {
    code: Option<String>,
    title: Option<String>,
    credits: Option<String>,
}

/// Convert the course catalog into a Turtle dump. Returns the number of
/// statements written.
pub fn run_conversion(config: &XmlConfig) -> Result<usize> {
    if !config.xml.exists() {
        bail!("{} not found.", config.xml.display());
    }
    let content = fs::read_to_string(&config.xml)
        .with_context(|| format!("Failed to read XML source: {}", config.xml.display()))?;

    let departments = parse_catalog(&content)
        .with_context(|| format!("Failed to parse XML source: {}", config.xml.display()))?;

    let ns = Namespace::new(&config.base_iri);
    let mut graph = GraphBuilder::new(ns.clone());

    let mut courses = 0usize;
    for entry in &departments {
        let key = DepartmentKey::resolve(entry.code.as_deref());
        let department = DepartmentRecord {
            key: key.clone(),
            code: entry.code.clone(),
            name: entry.name.clone(),
        };
        emit_department(&mut graph, &ns, &department);

        for course in &entry.courses {
            let record = CourseRecord {
                key: CourseKey::resolve(course.code.as_deref(), course.title.as_deref()),
                code: course.code.clone(),
                title: course.title.clone(),
                credits: parse_credits(course.credits.as_deref()),
                // Link target only; attributes were already emitted above.
                department: Some(DepartmentRecord {
                    key: key.clone(),
                    code: None,
                    name: None,
                }),
            };
            emit_course(&mut graph, &ns, &record);
            courses += 1;
        }
    }

    info!(
        departments = departments.len(),
        courses,
        statements = graph.len(),
        "XML source converted"
    );
    graph.write_turtle(&config.output)
}

/// Credits are kept only when the text is a pure digit string; "12x" or a
/// blank value yields nothing.
fn parse_credits(text: Option<&str>) -> Option<i64> {
    let text = text?.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    let value = element
        .try_get_attribute(name)?
        .map(|attr| attr.unescape_value().map(|v| v.into_owned()))
        .transpose()?;
    Ok(non_blank(value.as_deref()))
}

fn parse_catalog(content: &str) -> Result<Vec<DepartmentEntry>> {
    let mut reader = Reader::from_str(content);

    let mut departments = Vec::new();
    let mut department: Option<DepartmentEntry> = None;
    let mut course: Option<CourseEntry> = None;
    let mut in_field = false;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"department" => {
                    department = Some(DepartmentEntry {
                        code: attribute(e, "code")?,
                        name: attribute(e, "name")?,
                        courses: Vec::new(),
                    });
                }
                b"course" => course = Some(CourseEntry::default()),
                b"courseCode" | b"title" | b"credits" if course.is_some() => {
                    in_field = true;
                    text.clear();
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                // Self-closing elements: a department with no courses, or a
                // course/field with no content.
                b"department" => departments.push(DepartmentEntry {
                    code: attribute(e, "code")?,
                    name: attribute(e, "name")?,
                    courses: Vec::new(),
                }),
                b"course" => {
                    if let Some(d) = department.as_mut() {
                        d.courses.push(CourseEntry::default());
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_field {
                    text.push_str(&e.unescape()?);
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"courseCode" => {
                    if let Some(c) = course.as_mut() {
                        c.code = non_blank(Some(&text));
                    }
                    in_field = false;
                }
                b"title" => {
                    if let Some(c) = course.as_mut() {
                        c.title = non_blank(Some(&text));
                    }
                    in_field = false;
                }
                b"credits" => {
                    if let Some(c) = course.as_mut() {
                        c.credits = non_blank(Some(&text));
                    }
                    in_field = false;
                }
                b"course" => {
                    if let (Some(d), Some(c)) = (department.as_mut(), course.take()) {
                        d.courses.push(c);
                    }
                }
                b"department" => {
                    if let Some(d) = department.take() {
                        departments.push(d);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => bail!("XML parse error at byte {}: {e}", reader.buffer_position()),
        }
    }

    Ok(departments)
}

//! Typed entity records shared by the three extractors.
//!
//! Each extractor decodes its source format into these records; the emitter
//! never inspects raw rows or elements. Optional fields stay `None` when the
//! source omits them and contribute no triples downstream.

use std::fmt;

/// One student, from any source. `id` is the natural key used for minting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentRecord {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub major: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
}

/// One department. The key decides the minted identifier; `code`/`name`
/// become literal attributes when present.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentRecord {
    pub key: DepartmentKey,
    pub code: Option<String>,
    pub name: Option<String>,
}

/// One course, with the department it is offered by (when the source knows
/// it). The relational source keys courses by numeric id; the catalog source
/// resolves a key through [`CourseKey::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRecord {
    pub key: CourseKey,
    pub code: Option<String>,
    pub title: Option<String>,
    pub credits: Option<i64>,
    pub department: Option<DepartmentRecord>,
}

/// One enrollment row from the relational source.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentRecord {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub semester: Option<String>,
    pub year: Option<i64>,
    pub grade: Option<String>,
}

/// Ordered fallback policy for course keys: code, then title, then the
/// `Unknown` placeholder. Tagged so callers and tests can see which branch
/// fired instead of re-deriving it from the minted string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseKey {
    Id(i64),
    Code(String),
    Title(String),
    Placeholder,
}

impl CourseKey {
    pub fn resolve(code: Option<&str>, title: Option<&str>) -> Self {
        if let Some(code) = non_blank(code) {
            CourseKey::Code(code)
        } else if let Some(title) = non_blank(title) {
            CourseKey::Title(title)
        } else {
            CourseKey::Placeholder
        }
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseKey::Id(id) => write!(f, "{id}"),
            CourseKey::Code(code) => f.write_str(code),
            CourseKey::Title(title) => f.write_str(title),
            CourseKey::Placeholder => f.write_str("Unknown"),
        }
    }
}

/// Key policy for catalog departments: the `code` attribute, or the
/// `Unknown` placeholder when absent. Relational departments are keyed by
/// name instead ([`DepartmentKey::Name`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentKey {
    Name(String),
    Code(String),
    Placeholder,
}

impl DepartmentKey {
    pub fn resolve(code: Option<&str>) -> Self {
        match non_blank(code) {
            Some(code) => DepartmentKey::Code(code),
            None => DepartmentKey::Placeholder,
        }
    }
}

impl fmt::Display for DepartmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepartmentKey::Name(name) => f.write_str(name),
            DepartmentKey::Code(code) => f.write_str(code),
            DepartmentKey::Placeholder => f.write_str(""),
        }
    }
}

/// Split a single "full name" field on the first space. No space means the
/// whole field is the first name; an empty field yields neither part.
pub fn split_full_name(full_name: &str) -> (Option<String>, Option<String>) {
    let trimmed = full_name.trim();
    if trimmed.is_empty() {
        return (None, None);
    }
    match trimmed.split_once(' ') {
        Some((first, last)) => (Some(first.to_string()), Some(last.to_string())),
        None => (Some(trimmed.to_string()), None),
    }
}

/// Normalize an optional field: whitespace-only counts as absent.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_space_only() {
        assert_eq!(
            split_full_name("Ada Lovelace"),
            (Some("Ada".to_string()), Some("Lovelace".to_string()))
        );
        assert_eq!(
            split_full_name("Charles Babbage Jr"),
            (Some("Charles".to_string()), Some("Babbage Jr".to_string()))
        );
    }

    #[test]
    fn single_token_is_first_name_only() {
        assert_eq!(split_full_name("Cher"), (Some("Cher".to_string()), None));
    }

    #[test]
    fn empty_name_yields_nothing() {
        assert_eq!(split_full_name(""), (None, None));
        assert_eq!(split_full_name("   "), (None, None));
    }

    #[test]
    fn course_key_prefers_code() {
        assert_eq!(
            CourseKey::resolve(Some("CS101"), Some("Intro")),
            CourseKey::Code("CS101".to_string())
        );
    }

    #[test]
    fn course_key_falls_back_to_title() {
        assert_eq!(
            CourseKey::resolve(None, Some("Intro")),
            CourseKey::Title("Intro".to_string())
        );
        // Blank code counts as absent.
        assert_eq!(
            CourseKey::resolve(Some("  "), Some("Intro")),
            CourseKey::Title("Intro".to_string())
        );
    }

    #[test]
    fn course_key_placeholder_when_nothing_resolves() {
        let key = CourseKey::resolve(None, None);
        assert_eq!(key, CourseKey::Placeholder);
        assert_eq!(key.to_string(), "Unknown");
    }

    #[test]
    fn department_key_resolution() {
        assert_eq!(
            DepartmentKey::resolve(Some("CS")),
            DepartmentKey::Code("CS".to_string())
        );
        assert_eq!(DepartmentKey::resolve(None), DepartmentKey::Placeholder);
        assert_eq!(DepartmentKey::resolve(Some("")), DepartmentKey::Placeholder);
    }
}

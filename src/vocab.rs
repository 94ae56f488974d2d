//! Ontology namespace handling and identifier minting.
//!
//! All converters share one fixed vocabulary of classes and predicates under
//! a single base namespace. Identifiers are minted as `<ns><Kind>/<key>`, so
//! re-running a converter against unchanged source data reproduces the exact
//! same identifiers.

use oxrdf::NamedNode;

/// Canonical ontology namespace, guaranteed to end in `#` or `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace(String);

impl Namespace {
    /// Normalize a base IRI into a namespace prefix. Appends `#` unless the
    /// base already ends in a fragment or path separator.
    pub fn new(base: &str) -> Self {
        if base.ends_with('#') || base.ends_with('/') {
            Self(base.to_string())
        } else {
            Self(format!("{base}#"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Mint a term in this namespace.
    ///
    /// Uses unchecked construction: a course-title fallback key may carry
    /// characters outside the strict IRI grammar, and minting must stay
    /// total and deterministic rather than reject such records.
    pub fn term(&self, local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("{}{}", self.0, local))
    }

    // Ontology classes.

    pub fn class_student(&self) -> NamedNode {
        self.term("Student")
    }

    pub fn class_course(&self) -> NamedNode {
        self.term("Course")
    }

    pub fn class_department(&self) -> NamedNode {
        self.term("Department")
    }

    pub fn class_enrollment(&self) -> NamedNode {
        self.term("Enrollment")
    }

    // Ontology predicates.

    pub fn first_name(&self) -> NamedNode {
        self.term("firstName")
    }

    pub fn last_name(&self) -> NamedNode {
        self.term("lastName")
    }

    pub fn date_of_birth(&self) -> NamedNode {
        self.term("dateOfBirth")
    }

    pub fn major(&self) -> NamedNode {
        self.term("major")
    }

    pub fn email(&self) -> NamedNode {
        self.term("email")
    }

    pub fn phone(&self) -> NamedNode {
        self.term("phone")
    }

    pub fn country(&self) -> NamedNode {
        self.term("country")
    }

    pub fn course_code(&self) -> NamedNode {
        self.term("courseCode")
    }

    pub fn course_title(&self) -> NamedNode {
        self.term("courseTitle")
    }

    pub fn credits(&self) -> NamedNode {
        self.term("credits")
    }

    pub fn department_name(&self) -> NamedNode {
        self.term("departmentName")
    }

    pub fn department_code(&self) -> NamedNode {
        self.term("departmentCode")
    }

    pub fn semester(&self) -> NamedNode {
        self.term("semester")
    }

    pub fn year(&self) -> NamedNode {
        self.term("year")
    }

    pub fn grade(&self) -> NamedNode {
        self.term("grade")
    }

    pub fn has_enrollment(&self) -> NamedNode {
        self.term("hasEnrollment")
    }

    pub fn enrolled_in_course(&self) -> NamedNode {
        self.term("enrolledInCourse")
    }

    pub fn offered_by_department(&self) -> NamedNode {
        self.term("offeredByDepartment")
    }

    // Identifier minting, one operation per entity kind.

    pub fn student(&self, key: &str) -> NamedNode {
        self.term(&format!("Student/{key}"))
    }

    pub fn course(&self, key: &str) -> NamedNode {
        self.term(&format!("Course/{key}"))
    }

    pub fn enrollment(&self, key: &str) -> NamedNode {
        self.term(&format!("Enrollment/{key}"))
    }

    /// Department keys are slugified: trimmed, whitespace runs replaced
    /// with `_`. A blank key mints the `Unknown` placeholder, which collides
    /// with a department literally named "Unknown" -- a documented edge
    /// case, not an error.
    pub fn department(&self, key: &str) -> NamedNode {
        let slug = slugify(key);
        if slug.is_empty() {
            self.term("Department/Unknown")
        } else {
            self.term(&format!("Department/{slug}"))
        }
    }
}

fn slugify(key: &str) -> String {
    key.split_whitespace().collect::<Vec<_>>().join("_")
}

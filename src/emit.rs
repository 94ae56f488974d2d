//! Maps typed entity records into RDF statements.
//!
//! For each record: a type assertion, then one literal triple per present
//! attribute (credits/year typed `xsd:integer`, date of birth `xsd:date`),
//! then relationship triples. Departments known only through a course are
//! minted inline here, since no extractor yields them separately.

use oxrdf::vocab::{rdf, xsd};
use oxrdf::Literal;

use crate::graph::GraphBuilder;
use crate::models::{CourseRecord, DepartmentRecord, EnrollmentRecord, StudentRecord};
use crate::vocab::Namespace;

pub fn emit_student(graph: &mut GraphBuilder, ns: &Namespace, student: &StudentRecord) {
    let subject = ns.student(&student.id);
    graph.insert(&subject, rdf::TYPE, ns.class_student());

    if let Some(v) = &student.first_name {
        graph.insert(&subject, ns.first_name(), Literal::new_simple_literal(v));
    }
    if let Some(v) = &student.last_name {
        graph.insert(&subject, ns.last_name(), Literal::new_simple_literal(v));
    }
    if let Some(v) = &student.date_of_birth {
        graph.insert(
            &subject,
            ns.date_of_birth(),
            Literal::new_typed_literal(v.as_str(), xsd::DATE),
        );
    }
    if let Some(v) = &student.major {
        graph.insert(&subject, ns.major(), Literal::new_simple_literal(v));
    }
    if let Some(v) = &student.email {
        graph.insert(&subject, ns.email(), Literal::new_simple_literal(v));
    }
    if let Some(v) = &student.phone {
        graph.insert(&subject, ns.phone(), Literal::new_simple_literal(v));
    }
    if let Some(v) = &student.country {
        graph.insert(&subject, ns.country(), Literal::new_simple_literal(v));
    }
}

pub fn emit_department(graph: &mut GraphBuilder, ns: &Namespace, department: &DepartmentRecord) {
    let subject = ns.department(&department.key.to_string());
    graph.insert(&subject, rdf::TYPE, ns.class_department());

    if let Some(v) = &department.code {
        graph.insert(&subject, ns.department_code(), Literal::new_simple_literal(v));
    }
    if let Some(v) = &department.name {
        graph.insert(&subject, ns.department_name(), Literal::new_simple_literal(v));
    }
}

pub fn emit_course(graph: &mut GraphBuilder, ns: &Namespace, course: &CourseRecord) {
    let subject = ns.course(&course.key.to_string());
    graph.insert(&subject, rdf::TYPE, ns.class_course());

    if let Some(v) = &course.code {
        graph.insert(&subject, ns.course_code(), Literal::new_simple_literal(v));
    }
    if let Some(v) = &course.title {
        graph.insert(&subject, ns.course_title(), Literal::new_simple_literal(v));
    }
    if let Some(v) = course.credits {
        graph.insert(
            &subject,
            ns.credits(),
            Literal::new_typed_literal(v.to_string(), xsd::INTEGER),
        );
    }

    if let Some(department) = &course.department {
        emit_department(graph, ns, department);
        let target = ns.department(&department.key.to_string());
        graph.insert(&subject, ns.offered_by_department(), target);
    }
}

pub fn emit_enrollment(graph: &mut GraphBuilder, ns: &Namespace, enrollment: &EnrollmentRecord) {
    let subject = ns.enrollment(&enrollment.id.to_string());
    graph.insert(&subject, rdf::TYPE, ns.class_enrollment());

    if let Some(v) = &enrollment.semester {
        graph.insert(&subject, ns.semester(), Literal::new_simple_literal(v));
    }
    if let Some(v) = enrollment.year {
        graph.insert(
            &subject,
            ns.year(),
            Literal::new_typed_literal(v.to_string(), xsd::INTEGER),
        );
    }
    if let Some(v) = &enrollment.grade {
        graph.insert(&subject, ns.grade(), Literal::new_simple_literal(v));
    }

    let student = ns.student(&enrollment.student_id.to_string());
    let course = ns.course(&enrollment.course_id.to_string());
    graph.insert(&student, ns.has_enrollment(), subject.clone());
    graph.insert(&subject, ns.enrolled_in_course(), course);
}

use std::str::FromStr;

use crate::fd_ast::AnalysisInput;
use crate::fd_parser::parse_attribute_list;

/// Built-in teaching schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// Enrollment with a composite key and two partial dependencies.
    Student,
    /// Patient visits, mixing a partial and a transitive dependency.
    Medical,
    /// Books whose publisher address hangs off the publisher name.
    Library,
    /// Already normalized two-column table.
    Flat,
}

impl Sample {
    pub const ALL: [Sample; 4] = [Sample::Student, Sample::Medical, Sample::Library, Sample::Flat];

    pub fn name(self) -> &'static str {
        match self {
            Sample::Student => "student",
            Sample::Medical => "medical",
            Sample::Library => "library",
            Sample::Flat => "flat",
        }
    }

    pub fn input(self) -> AnalysisInput {
        let (table, attributes, key, dependencies): (&str, &str, &str, &[&str]) = match self {
            Sample::Student => (
                "Enrollment",
                "StudentID, CourseID, StudentName, CourseName, InstructorName, Grade",
                "StudentID, CourseID",
                &[
                    "StudentID -> StudentName",
                    "CourseID -> CourseName, InstructorName",
                    "StudentID, CourseID -> Grade",
                ],
            ),
            Sample::Medical => (
                "Visits",
                "patient_id, visit_date, patient_name, doctor_name, doctor_specialty, diagnosis",
                "patient_id, visit_date",
                &[
                    "patient_id -> patient_name",
                    "patient_id, visit_date -> doctor_name, diagnosis",
                    "doctor_name -> doctor_specialty",
                ],
            ),
            Sample::Library => (
                "Books",
                "BookID, Title, PublisherName, PublisherAddress",
                "BookID",
                &[
                    "BookID -> Title, PublisherName",
                    "PublisherName -> PublisherAddress",
                ],
            ),
            Sample::Flat => ("Main", "A, B", "A", &["A -> B"]),
        };

        AnalysisInput {
            table_name: table.to_string(),
            attributes: parse_attribute_list(attributes),
            primary_key: parse_attribute_list(key),
            dependencies: dependencies.join("\n"),
        }
    }
}

impl FromStr for Sample {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sample::ALL
            .into_iter()
            .find(|sample| sample.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<&str> = Sample::ALL.iter().map(|s| s.name()).collect();
                format!("unknown sample `{s}` (expected one of: {})", known.join(", "))
            })
    }
}

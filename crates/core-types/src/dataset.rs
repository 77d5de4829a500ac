use crate::error::CoreError;
use crate::structs::{Grade, Student, Subject};
use serde::{Deserialize, Serialize};

/// The three record collections of a session, owned by the caller.
///
/// Reporting code only ever borrows these slices; mutation and reloading
/// happen here, between queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub students: Vec<Student>,
    pub subjects: Vec<Subject>,
    pub grades: Vec<Grade>,
}

impl Dataset {
    pub fn new(students: Vec<Student>, subjects: Vec<Subject>, grades: Vec<Grade>) -> Self {
        Self { students, subjects, grades }
    }

    /// Validates every record and returns all failures, in collection order
    /// (students, then subjects, then grades).
    pub fn validate(&self) -> Vec<CoreError> {
        let students = self.students.iter().map(Student::validate);
        let subjects = self.subjects.iter().map(Subject::validate);
        let grades = self.grades.iter().map(Grade::validate);
        students
            .chain(subjects)
            .chain(grades)
            .filter_map(Result::err)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty() && self.subjects.is_empty() && self.grades.is_empty()
    }
}

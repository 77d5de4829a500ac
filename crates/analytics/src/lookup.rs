//! Scanning helpers over the three record collections.
//!
//! Every function preserves the relative order of the input slice and returns
//! an empty `Vec` rather than failing when nothing matches.

use core_types::{Grade, Student, Subject};
use std::collections::HashSet;

/// First student whose matricule equals `matricule`.
pub fn find_student<'a>(students: &'a [Student], matricule: &str) -> Option<&'a Student> {
    students.iter().find(|s| s.matricule == matricule)
}

/// First subject whose code equals `code`.
pub fn find_subject<'a>(subjects: &'a [Subject], code: &str) -> Option<&'a Subject> {
    subjects.iter().find(|s| s.code == code)
}

/// All grades recorded for one student.
pub fn grades_of_student<'a>(grades: &'a [Grade], matricule: &str) -> Vec<&'a Grade> {
    grades.iter().filter(|g| g.matricule == matricule).collect()
}

/// All grades recorded in one subject, whatever the level of the student.
pub fn grades_of_subject<'a>(grades: &'a [Grade], code: &str) -> Vec<&'a Grade> {
    grades.iter().filter(|g| g.subject_code == code).collect()
}

/// All students enrolled in one level.
pub fn students_of_level<'a>(students: &'a [Student], niveau: &str) -> Vec<&'a Student> {
    students.iter().filter(|s| s.niveau == niveau).collect()
}

/// All grades belonging to students of one level.
///
/// Resolves the level's matricules first, then keeps the grades whose
/// matricule is among them.
pub fn grades_of_level<'a>(
    students: &[Student],
    grades: &'a [Grade],
    niveau: &str,
) -> Vec<&'a Grade> {
    let matricules: HashSet<&str> = students
        .iter()
        .filter(|s| s.niveau == niveau)
        .map(|s| s.matricule.as_str())
        .collect();
    grades
        .iter()
        .filter(|g| matricules.contains(g.matricule.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn students() -> Vec<Student> {
        vec![
            Student::new("M001", "Diallo", "Awa", "L1"),
            Student::new("M002", "Sow", "Ibrahima", "L2"),
            Student::new("M001", "Doublon", "Awa", "L3"),
            Student::new("M003", "Ba", "Fatou", "L1"),
        ]
    }

    fn grades() -> Vec<Grade> {
        vec![
            Grade::new("M001", "MATH101", dec!(15)),
            Grade::new("M002", "MATH201", dec!(9)),
            Grade::new("M003", "MATH101", dec!(18)),
            Grade::new("M001", "PHYS101", dec!(10)),
            Grade::new("GONE", "MATH101", dec!(12)),
        ]
    }

    #[test]
    fn find_student_returns_first_match() {
        let students = students();
        let found = find_student(&students, "M001").unwrap();
        assert_eq!(found.last_name, "Diallo");
        assert!(find_student(&students, "M999").is_none());
    }

    #[test]
    fn find_subject_is_exact_match() {
        let subjects = vec![Subject::new("MATH101", "Maths", dec!(3), "L1")];
        assert!(find_subject(&subjects, "MATH101").is_some());
        assert!(find_subject(&subjects, "math101").is_none());
    }

    #[test]
    fn grade_filters_preserve_input_order() {
        let grades = grades();
        let by_student: Vec<_> = grades_of_student(&grades, "M001")
            .iter()
            .map(|g| g.subject_code.as_str())
            .collect();
        assert_eq!(by_student, vec!["MATH101", "PHYS101"]);

        let by_subject: Vec<_> = grades_of_subject(&grades, "MATH101")
            .iter()
            .map(|g| g.matricule.as_str())
            .collect();
        assert_eq!(by_subject, vec!["M001", "M003", "GONE"]);
    }

    #[test]
    fn grades_of_level_joins_through_students() {
        let students = students();
        let grades = grades();
        let notes: Vec<_> = grades_of_level(&students, &grades, "L1")
            .iter()
            .map(|g| g.note)
            .collect();
        assert_eq!(notes, vec![dec!(15), dec!(18), dec!(10)]);
    }

    #[test]
    fn empty_matches_are_empty_vectors() {
        let students = students();
        let grades = grades();
        assert!(grades_of_student(&grades, "M999").is_empty());
        assert!(grades_of_subject(&grades, "CHEM101").is_empty());
        assert!(students_of_level(&students, "M2").is_empty());
        assert!(grades_of_level(&students, &grades, "M2").is_empty());
    }
}

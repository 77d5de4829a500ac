use crate::error::AnalyticsError;
use crate::lookup;
use crate::ranking::{self, RankedStudent, StudentAverage, SubjectTopScore};
use core_types::{CoreError, Dataset, Grade, MAX_COEFFICIENT, Student, Subject, TieBreak};
use rust_decimal::Decimal;

/// A stateless calculator for academic performance.
///
/// The engine borrows the caller's collections and holds nothing else besides
/// its tie-break policy, so it cannot outlive a reload of the data. Build a new
/// one for each batch of queries.
///
/// Records that break the engine's contract (a note outside `[0, 20]`, a subject
/// coefficient `<= 0`) are skipped with a warning. Use [`StatisticsEngine::strict`]
/// to reject such collections up front instead.
#[derive(Debug, Clone, Copy)]
pub struct StatisticsEngine<'a> {
    students: &'a [Student],
    subjects: &'a [Subject],
    grades: &'a [Grade],
    tie_break: TieBreak,
}

impl<'a> StatisticsEngine<'a> {
    pub fn new(students: &'a [Student], subjects: &'a [Subject], grades: &'a [Grade]) -> Self {
        Self {
            students,
            subjects,
            grades,
            tie_break: TieBreak::default(),
        }
    }

    pub fn from_dataset(dataset: &'a Dataset) -> Self {
        Self::new(&dataset.students, &dataset.subjects, &dataset.grades)
    }

    /// Builds an engine only if every subject has a positive coefficient and
    /// every grade a note within `[0, 20]`.
    pub fn strict(
        students: &'a [Student],
        subjects: &'a [Subject],
        grades: &'a [Grade],
    ) -> Result<Self, AnalyticsError> {
        let mut violations = contract_violations(subjects, grades);
        if violations.is_empty() {
            return Ok(Self::new(students, subjects, grades));
        }
        let count = violations.len();
        let first = violations.swap_remove(0);
        tracing::error!(count, first = %first, "Rejecting invalid input collections.");
        Err(AnalyticsError::InvalidInput { count, first })
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn students(&self) -> &'a [Student] {
        self.students
    }

    pub fn subjects(&self) -> &'a [Subject] {
        self.subjects
    }

    pub fn grades(&self) -> &'a [Grade] {
        self.grades
    }

    // ========== Student scope ==========

    /// Weighted average of a student over the subjects of their current level.
    ///
    /// Grades in subjects of another level, or in subjects that no longer exist,
    /// are left out. `None` when the student is unknown or nothing is eligible.
    pub fn student_average(&self, matricule: &str) -> Option<Decimal> {
        let student = lookup::find_student(self.students, matricule)?;
        self.weighted_average(student)
    }

    /// 1-based position of the student in their class ranking.
    pub fn student_rank(&self, matricule: &str) -> Option<usize> {
        let student = lookup::find_student(self.students, matricule)?;
        self.class_ranking(&student.niveau)
            .iter()
            .find(|r| r.student.matricule == matricule)
            .map(|r| r.rank)
    }

    // ========== Class scope ==========

    /// Mean of the class members' averages, ignoring members without one.
    pub fn class_average(&self, niveau: &str) -> Option<Decimal> {
        let averages: Vec<Decimal> = self
            .class_averages(niveau)
            .into_iter()
            .map(|entry| entry.average)
            .collect();
        mean(&averages)
    }

    pub fn best_student_in_class(&self, niveau: &str) -> Option<StudentAverage<'a>> {
        let candidates = self
            .class_averages(niveau)
            .into_iter()
            .map(|entry| (entry.student, entry.average));
        ranking::select_best(candidates, self.tie_break)
            .map(|(student, average)| StudentAverage { student, average })
    }

    /// Students of the level that have an average, best first. Students without
    /// an average are left out rather than ranked last.
    pub fn class_ranking(&self, niveau: &str) -> Vec<RankedStudent<'a>> {
        ranking::rank_by_average(self.class_averages(niveau), self.tie_break)
    }

    // ========== Subject scope ==========

    /// Unweighted mean of every note recorded in the subject, across all levels.
    pub fn subject_average(&self, code: &str) -> Option<Decimal> {
        let notes: Vec<Decimal> = lookup::grades_of_subject(self.grades, code)
            .into_iter()
            .filter(|g| self.is_usable(g))
            .map(|g| g.note)
            .collect();
        mean(&notes)
    }

    /// The student holding the highest note in the subject. Grades whose student
    /// cannot be resolved are passed over.
    pub fn best_student_in_subject(&self, code: &str) -> Option<SubjectTopScore<'a>> {
        let candidates = lookup::grades_of_subject(self.grades, code)
            .into_iter()
            .filter(|g| self.is_usable(g))
            .filter_map(|g| match lookup::find_student(self.students, &g.matricule) {
                Some(student) => Some((student, g.note)),
                None => {
                    tracing::debug!(matricule = %g.matricule, code, "Skipping orphaned grade.");
                    None
                }
            });
        ranking::select_best(candidates, self.tie_break)
            .map(|(student, note)| SubjectTopScore { student, note })
    }

    // ========== Global scope ==========

    /// Unweighted mean of every note on record.
    pub fn global_average(&self) -> Option<Decimal> {
        let notes: Vec<Decimal> = self
            .grades
            .iter()
            .filter(|g| self.is_usable(g))
            .map(|g| g.note)
            .collect();
        mean(&notes)
    }

    pub fn best_student_global(&self) -> Option<StudentAverage<'a>> {
        let candidates = self
            .students
            .iter()
            .filter_map(|s| self.weighted_average(s).map(|average| (s, average)));
        ranking::select_best(candidates, self.tie_break)
            .map(|(student, average)| StudentAverage { student, average })
    }

    // ========== Internals ==========

    /// Averages of the level's students, in input order, members without one omitted.
    pub(crate) fn class_averages(&self, niveau: &str) -> Vec<StudentAverage<'a>> {
        lookup::students_of_level(self.students, niveau)
            .into_iter()
            .filter_map(|student| {
                self.weighted_average(student)
                    .map(|average| StudentAverage { student, average })
            })
            .collect()
    }

    fn weighted_average(&self, student: &Student) -> Option<Decimal> {
        let mut total_points = Decimal::ZERO;
        let mut total_coefficients = Decimal::ZERO;

        for grade in lookup::grades_of_student(self.grades, &student.matricule) {
            if !self.is_usable(grade) {
                continue;
            }
            let Some(subject) = lookup::find_subject(self.subjects, &grade.subject_code) else {
                tracing::debug!(
                    matricule = %grade.matricule,
                    code = %grade.subject_code,
                    "Grade references an unknown subject; excluded."
                );
                continue;
            };
            if subject.niveau != student.niveau {
                continue;
            }
            if !subject.has_valid_coefficient() {
                tracing::warn!(
                    code = %subject.code,
                    coefficient = %subject.coefficient,
                    "Subject coefficient out of range; excluded from weighted averages."
                );
                continue;
            }
            let accumulated = grade
                .note
                .checked_mul(subject.coefficient)
                .and_then(|points| total_points.checked_add(points))
                .zip(total_coefficients.checked_add(subject.coefficient));
            let Some((points, coefficients)) = accumulated else {
                tracing::warn!(
                    matricule = %grade.matricule,
                    code = %subject.code,
                    "Weighted sum overflowed; grade excluded."
                );
                continue;
            };
            total_points = points;
            total_coefficients = coefficients;
        }

        if total_coefficients.is_zero() {
            return None;
        }
        Some(total_points / total_coefficients)
    }

    fn is_usable(&self, grade: &Grade) -> bool {
        if grade.is_note_in_range() {
            return true;
        }
        tracing::warn!(
            matricule = %grade.matricule,
            code = %grade.subject_code,
            note = %grade.note,
            "Grade note outside [0, 20]; excluded."
        );
        false
    }
}

/// Arithmetic mean, `None` for an empty slice.
fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().sum();
    Some(sum / Decimal::from(values.len()))
}

/// Records that would make an aggregate meaningless: coefficients outside
/// `(0, MAX_COEFFICIENT]` and out-of-range notes.
fn contract_violations(subjects: &[Subject], grades: &[Grade]) -> Vec<CoreError> {
    let bad_subjects = subjects
        .iter()
        .filter(|s| !s.has_valid_coefficient())
        .map(|s| {
            CoreError::InvalidInput(
                format!("subject '{}'", s.code),
                format!(
                    "coefficient must be greater than 0 and at most {MAX_COEFFICIENT}, got {}",
                    s.coefficient
                ),
            )
        });
    let bad_grades = grades.iter().filter(|g| !g.is_note_in_range()).map(|g| {
        CoreError::InvalidInput(
            format!("grade ({}, {})", g.matricule, g.subject_code),
            format!("note must lie between 0 and 20, got {}", g.note),
        )
    });
    bad_subjects.chain(bad_grades).collect()
}

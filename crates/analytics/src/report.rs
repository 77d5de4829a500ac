use crate::engine::StatisticsEngine;
use crate::lookup;
use crate::ranking::{RankedStudent, StudentAverage, SubjectTopScore};
use core_types::{Student, Subject};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;

/// One subject line of a report card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportCardLine<'a> {
    pub subject: &'a Subject,
    /// `None` when the student has no usable grade in this subject yet.
    pub note: Option<Decimal>,
    /// `note * coefficient`.
    pub points: Option<Decimal>,
}

/// A student's report card: every subject of their current level, their
/// weighted average and their position in the class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentReport<'a> {
    pub student: &'a Student,
    pub lines: Vec<ReportCardLine<'a>>,
    pub average: Option<Decimal>,
    pub rank: Option<usize>,
    /// Number of classmates (the student included) holding a rank.
    pub ranked_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassReport<'a> {
    pub niveau: String,
    pub enrolled: usize,
    pub average: Option<Decimal>,
    pub best: Option<StudentAverage<'a>>,
    pub ranking: Vec<RankedStudent<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectReport<'a> {
    pub code: String,
    /// `None` when grades still reference a subject that was removed.
    pub subject: Option<&'a Subject>,
    pub grade_count: usize,
    pub average: Option<Decimal>,
    pub best: Option<SubjectTopScore<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelAverage {
    pub niveau: String,
    pub average: Decimal,
}

/// Dashboard figures for the whole establishment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview<'a> {
    pub student_count: usize,
    pub subject_count: usize,
    pub grade_count: usize,
    pub student_level_count: usize,
    pub subject_level_count: usize,
    pub global_average: Option<Decimal>,
    pub best_student: Option<StudentAverage<'a>>,
    /// Levels sorted by name; levels without any average are omitted.
    pub class_averages: Vec<LevelAverage>,
}

impl<'a> StatisticsEngine<'a> {
    /// Builds the report card of one student. `None` if the matricule is unknown.
    pub fn student_report(&self, matricule: &str) -> Option<StudentReport<'a>> {
        let student = lookup::find_student(self.students(), matricule)?;
        let grades = lookup::grades_of_student(self.grades(), matricule);

        let lines = self
            .subjects()
            .iter()
            .filter(|subject| subject.niveau == student.niveau && subject.has_valid_coefficient())
            .map(|subject| {
                let note = grades
                    .iter()
                    .find(|g| g.subject_code == subject.code && g.is_note_in_range())
                    .map(|g| g.note);
                ReportCardLine {
                    subject,
                    note,
                    points: note.and_then(|n| n.checked_mul(subject.coefficient)),
                }
            })
            .collect();

        let ranking = self.class_ranking(&student.niveau);
        let rank = ranking
            .iter()
            .find(|r| r.student.matricule == student.matricule)
            .map(|r| r.rank);

        Some(StudentReport {
            student,
            lines,
            average: self.student_average(matricule),
            rank,
            ranked_count: ranking.len(),
        })
    }

    pub fn class_report(&self, niveau: &str) -> ClassReport<'a> {
        ClassReport {
            niveau: niveau.to_string(),
            enrolled: lookup::students_of_level(self.students(), niveau).len(),
            average: self.class_average(niveau),
            best: self.best_student_in_class(niveau),
            ranking: self.class_ranking(niveau),
        }
    }

    /// `None` only when the code matches neither a subject nor any grade.
    pub fn subject_report(&self, code: &str) -> Option<SubjectReport<'a>> {
        let subject = lookup::find_subject(self.subjects(), code);
        let grade_count = lookup::grades_of_subject(self.grades(), code).len();
        if subject.is_none() && grade_count == 0 {
            return None;
        }
        Some(SubjectReport {
            code: code.to_string(),
            subject,
            grade_count,
            average: self.subject_average(code),
            best: self.best_student_in_subject(code),
        })
    }

    pub fn overview(&self) -> Overview<'a> {
        let student_levels: BTreeSet<&str> =
            self.students().iter().map(|s| s.niveau.as_str()).collect();
        let subject_levels: BTreeSet<&str> =
            self.subjects().iter().map(|s| s.niveau.as_str()).collect();

        let class_averages = student_levels
            .iter()
            .filter_map(|niveau| {
                self.class_average(niveau).map(|average| LevelAverage {
                    niveau: niveau.to_string(),
                    average,
                })
            })
            .collect();

        Overview {
            student_count: self.students().len(),
            subject_count: self.subjects().len(),
            grade_count: self.grades().len(),
            student_level_count: student_levels.len(),
            subject_level_count: subject_levels.len(),
            global_average: self.global_average(),
            best_student: self.best_student_global(),
            class_averages,
        }
    }
}

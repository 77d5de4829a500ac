use core_types::{Student, TieBreak};
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;

/// A student paired with their weighted average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentAverage<'a> {
    pub student: &'a Student,
    pub average: Decimal,
}

/// One row of a class ranking. Ranks are positional: 1..=k with no gaps and no
/// shared ranks, even when averages tie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStudent<'a> {
    pub rank: usize,
    pub student: &'a Student,
    pub average: Decimal,
}

/// The student holding the highest note in a subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectTopScore<'a> {
    pub student: &'a Student,
    pub note: Decimal,
}

/// Sorts by average (descending) and assigns positional ranks.
///
/// The sort is stable, so under `TieBreak::InputOrder` tied students keep the
/// order in which they were supplied.
pub fn rank_by_average<'a>(
    mut entries: Vec<StudentAverage<'a>>,
    tie_break: TieBreak,
) -> Vec<RankedStudent<'a>> {
    entries.sort_by(|a, b| {
        b.average
            .cmp(&a.average)
            .then_with(|| break_tie(a.student, b.student, tie_break))
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| RankedStudent {
            rank: i + 1,
            student: entry.student,
            average: entry.average,
        })
        .collect()
}

/// Picks the candidate with the highest value in a single linear scan.
///
/// A later candidate only replaces the current best when its value is strictly
/// greater, or when it is equal and wins the tie-break.
pub fn select_best<'a, I>(candidates: I, tie_break: TieBreak) -> Option<(&'a Student, Decimal)>
where
    I: IntoIterator<Item = (&'a Student, Decimal)>,
{
    candidates
        .into_iter()
        .fold(None, |best: Option<(&'a Student, Decimal)>, (student, value)| match best {
            None => Some((student, value)),
            Some((current, current_value)) => {
                let replaces = value > current_value
                    || (value == current_value
                        && break_tie(student, current, tie_break) == Ordering::Less);
                if replaces {
                    Some((student, value))
                } else {
                    best
                }
            }
        })
}

/// Secondary ordering for equal values. `Ordering::Less` means `a` comes first.
fn break_tie(a: &Student, b: &Student, tie_break: TieBreak) -> Ordering {
    match tie_break {
        TieBreak::InputOrder => Ordering::Equal,
        TieBreak::Matricule => a.matricule.cmp(&b.matricule),
    }
}

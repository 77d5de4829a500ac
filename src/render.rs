use analytics::{ClassReport, Overview, StudentReport, SubjectReport};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use core_types::{CoreError, Student};
use rust_decimal::Decimal;

/// Formats a decimal with a fixed number of places.
pub fn number(value: Decimal, precision: u32) -> String {
    format!("{:.*}", precision as usize, value.round_dp(precision))
}

/// Formats an optional value; absent values never print as zero.
pub fn optional(value: Option<Decimal>, precision: u32) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| number(v, precision))
}

pub fn rank(rank: Option<usize>, out_of: usize) -> String {
    rank.map_or_else(|| "n/a".to_string(), |r| format!("{r}/{out_of}"))
}

fn best(best: Option<(&Student, Decimal)>, precision: u32) -> String {
    best.map_or_else(
        || "n/a".to_string(),
        |(student, value)| format!("{} ({})", student, number(value, precision)),
    )
}

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().copied());
    table
}

fn numeric(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

pub fn student_summary(report: &StudentReport<'_>, precision: u32) -> String {
    format!(
        "{}\nAverage: {}\nRank:    {}",
        report.student,
        optional(report.average, precision),
        rank(report.rank, report.ranked_count),
    )
}

pub fn report_card(report: &StudentReport<'_>, precision: u32) -> String {
    let mut lines = table(&["Subject", "Note", "Coef", "Points"]);
    for line in &report.lines {
        lines.add_row(vec![
            Cell::new(&line.subject.name),
            numeric(optional(line.note, precision)),
            numeric(number(line.subject.coefficient, precision)),
            numeric(optional(line.points, precision)),
        ]);
    }
    format!(
        "REPORT CARD\nStudent:   {}\nMatricule: {}\nLevel:     {}\n{lines}\nAverage: {}/20\nRank:    {}",
        report.student.full_name(),
        report.student.matricule,
        report.student.niveau,
        optional(report.average, precision),
        rank(report.rank, report.ranked_count),
    )
}

pub fn class(report: &ClassReport<'_>, precision: u32) -> String {
    let mut ranking = table(&["Rank", "Matricule", "Name", "Average"]);
    for row in &report.ranking {
        ranking.add_row(vec![
            numeric(row.rank.to_string()),
            Cell::new(&row.student.matricule),
            Cell::new(row.student.full_name()),
            numeric(number(row.average, precision)),
        ]);
    }
    format!(
        "Class {} ({} enrolled, {} ranked)\nClass average: {}\nBest student:  {}\n{ranking}",
        report.niveau,
        report.enrolled,
        report.ranking.len(),
        optional(report.average, precision),
        best(report.best.as_ref().map(|b| (b.student, b.average)), precision),
    )
}

pub fn subject(report: &SubjectReport<'_>, precision: u32) -> String {
    let title = report
        .subject
        .map_or_else(|| format!("{} (removed subject)", report.code), |s| s.to_string());
    format!(
        "{title}\nGrades recorded: {}\nAverage:         {}\nBest student:    {}",
        report.grade_count,
        optional(report.average, precision),
        best(report.best.as_ref().map(|b| (b.student, b.note)), precision),
    )
}

pub fn global(average: Option<Decimal>, top: Option<(&Student, Decimal)>, precision: u32) -> String {
    format!(
        "Global average: {}\nBest student:   {}",
        optional(average, precision),
        best(top, precision),
    )
}

pub fn overview(overview: &Overview<'_>, precision: u32) -> String {
    let mut counts = table(&["Figure", "Value"]);
    counts
        .add_row(vec![
            Cell::new("Students"),
            numeric(format!("{} across {} classes", overview.student_count, overview.student_level_count)),
        ])
        .add_row(vec![
            Cell::new("Subjects"),
            numeric(format!("{} across {} levels", overview.subject_count, overview.subject_level_count)),
        ])
        .add_row(vec![Cell::new("Grades"), numeric(overview.grade_count.to_string())])
        .add_row(vec![
            Cell::new("Overall average"),
            numeric(optional(overview.global_average, precision)),
        ]);

    let mut levels = table(&["Level", "Class average"]);
    for level in &overview.class_averages {
        levels.add_row(vec![Cell::new(&level.niveau), numeric(number(level.average, precision))]);
    }

    format!(
        "{counts}\nBest student: {}\n{levels}",
        best(overview.best_student.as_ref().map(|b| (b.student, b.average)), precision),
    )
}

pub fn validation(errors: &[CoreError]) -> String {
    if errors.is_empty() {
        return "All records are valid.".to_string();
    }
    let mut report = table(&["#", "Problem"]);
    for (i, error) in errors.iter().enumerate() {
        report.add_row(vec![numeric((i + 1).to_string()), Cell::new(error)]);
    }
    format!("{} invalid record(s)\n{report}", errors.len())
}

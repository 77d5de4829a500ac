use analytics::StatisticsEngine;
use core_types::{Dataset, Grade, Student, Subject, TieBreak};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn l1_dataset() -> Dataset {
    Dataset::new(
        vec![
            Student::new("M001", "Diallo", "Awa", "L1"),
            Student::new("M002", "Sow", "Ibrahima", "L1"),
            Student::new("M003", "Ba", "Fatou", "L1"),
        ],
        vec![
            Subject::new("MATH101", "Mathématiques", dec!(3), "L1"),
            Subject::new("PHYS101", "Physique", dec!(2), "L1"),
            Subject::new("OLD201", "Ancien programme", dec!(5), "L0"),
        ],
        vec![
            Grade::new("M001", "MATH101", dec!(15.0)),
            Grade::new("M001", "PHYS101", dec!(10.0)),
        ],
    )
}

#[test]
fn weighted_average_of_two_subjects() {
    let data = l1_dataset();
    let engine = StatisticsEngine::from_dataset(&data);
    assert_eq!(engine.student_average("M001"), Some(dec!(13.0)));
}

#[test]
fn grades_from_another_level_are_not_weighted() {
    let mut data = l1_dataset();
    data.grades.push(Grade::new("M001", "OLD201", dec!(18.0)));
    let engine = StatisticsEngine::from_dataset(&data);
    assert_eq!(engine.student_average("M001"), Some(dec!(13.0)));
}

#[test]
fn tied_averages_get_distinct_consecutive_ranks() {
    let mut data = l1_dataset();
    data.grades.push(Grade::new("M002", "MATH101", dec!(13)));

    let engine = StatisticsEngine::from_dataset(&data);
    let ranking = engine.class_ranking("L1");
    let rows: Vec<_> = ranking
        .iter()
        .map(|r| (r.rank, r.student.matricule.as_str(), r.average))
        .collect();
    // Input order decides between equals.
    assert_eq!(rows, vec![(1, "M001", dec!(13)), (2, "M002", dec!(13))]);
    assert_eq!(engine.student_rank("M001"), Some(1));
    assert_eq!(engine.student_rank("M002"), Some(2));
}

#[test]
fn tie_order_follows_input_order_not_matricule() {
    let mut data = l1_dataset();
    data.students.reverse();
    data.grades.push(Grade::new("M002", "MATH101", dec!(13)));

    let engine = StatisticsEngine::from_dataset(&data);
    let order: Vec<_> = engine
        .class_ranking("L1")
        .iter()
        .map(|r| r.student.matricule.clone())
        .collect();
    assert_eq!(order, vec!["M002", "M001"]);

    let by_matricule = engine.with_tie_break(TieBreak::Matricule);
    let order: Vec<_> = by_matricule
        .class_ranking("L1")
        .iter()
        .map(|r| r.student.matricule.clone())
        .collect();
    assert_eq!(order, vec!["M001", "M002"]);
}

#[test]
fn ungraded_students_are_left_out_of_the_ranking() {
    let data = l1_dataset();
    let engine = StatisticsEngine::from_dataset(&data);
    let ranking = engine.class_ranking("L1");
    assert_eq!(ranking.len(), 1);
    assert_eq!(engine.student_rank("M003"), None);
}

#[test]
fn nothing_to_report_without_grades() {
    let mut data = l1_dataset();
    data.grades.clear();
    let engine = StatisticsEngine::from_dataset(&data);
    assert_eq!(engine.global_average(), None);
    assert!(engine.best_student_global().is_none());
    assert_eq!(engine.class_average("L1"), None);
    assert!(engine.best_student_in_class("L1").is_none());
    assert!(engine.class_ranking("L1").is_empty());
}

#[test]
fn best_student_in_subject_takes_highest_note() {
    let mut data = l1_dataset();
    data.grades.push(Grade::new("M003", "MATH101", dec!(18.0)));
    let engine = StatisticsEngine::from_dataset(&data);
    let best = engine.best_student_in_subject("MATH101").unwrap();
    assert_eq!(best.student.matricule, "M003");
    assert_eq!(best.note, dec!(18.0));
}

#[test]
fn best_student_in_subject_skips_orphaned_grades() {
    let mut data = l1_dataset();
    data.grades.push(Grade::new("GONE", "MATH101", dec!(20)));
    let engine = StatisticsEngine::from_dataset(&data);
    let best = engine.best_student_in_subject("MATH101").unwrap();
    assert_eq!(best.student.matricule, "M001");
    assert_eq!(best.note, dec!(15));
    // The orphaned note still counts towards the subject mean.
    assert_eq!(engine.subject_average("MATH101"), Some(dec!(17.5)));
}

#[test]
fn subject_average_spans_levels() {
    let mut data = l1_dataset();
    data.students.push(Student::new("M010", "Fall", "Omar", "L2"));
    data.grades.push(Grade::new("M010", "MATH101", dec!(9)));
    let engine = StatisticsEngine::from_dataset(&data);
    assert_eq!(engine.subject_average("MATH101"), Some(dec!(12)));
    assert_eq!(engine.subject_average("CHEM101"), None);
}

#[test]
fn unknown_keys_are_absent_not_errors() {
    let data = l1_dataset();
    let engine = StatisticsEngine::from_dataset(&data);
    assert_eq!(engine.student_rank("M999"), None);
    assert_eq!(engine.student_average("M999"), None);
    assert!(engine.best_student_in_class("L9").is_none());
    assert!(engine.best_student_in_subject("CHEM101").is_none());
}

#[test]
fn removing_all_grades_makes_the_average_absent() {
    let mut data = l1_dataset();
    assert!(StatisticsEngine::from_dataset(&data).student_average("M001").is_some());

    data.grades.retain(|g| g.matricule != "M001");
    assert_eq!(StatisticsEngine::from_dataset(&data).student_average("M001"), None);
}

#[test]
fn global_average_of_a_single_grade_is_that_grade() {
    let data = Dataset::new(vec![], vec![], vec![Grade::new("M001", "MATH101", dec!(14.25))]);
    let engine = StatisticsEngine::from_dataset(&data);
    assert_eq!(engine.global_average(), Some(dec!(14.25)));
}

#[test]
fn best_in_class_keeps_the_first_of_equals() {
    let mut data = l1_dataset();
    data.grades.push(Grade::new("M002", "PHYS101", dec!(13)));
    data.grades.push(Grade::new("M003", "MATH101", dec!(13)));
    let engine = StatisticsEngine::from_dataset(&data);

    let best = engine.best_student_in_class("L1").unwrap();
    assert_eq!(best.student.matricule, "M001");
    assert_eq!(best.average, dec!(13));

    let global = engine.best_student_global().unwrap();
    assert_eq!(global.student.matricule, "M001");
}

#[test]
fn every_average_stays_on_the_twenty_point_scale() {
    let mut data = l1_dataset();
    data.grades.extend([
        Grade::new("M002", "MATH101", dec!(0)),
        Grade::new("M002", "PHYS101", dec!(20)),
        Grade::new("M003", "MATH101", dec!(20)),
        Grade::new("M003", "PHYS101", dec!(19.75)),
    ]);
    let engine = StatisticsEngine::from_dataset(&data);
    for student in &data.students {
        let average = engine.student_average(&student.matricule).unwrap();
        assert!(average >= Decimal::ZERO && average <= dec!(20), "{average}");
    }
}

#[test]
fn ranking_is_non_increasing_with_gapless_ranks() {
    let mut data = l1_dataset();
    data.grades.extend([
        Grade::new("M002", "MATH101", dec!(13)),
        Grade::new("M003", "PHYS101", dec!(16)),
    ]);
    let engine = StatisticsEngine::from_dataset(&data);
    let ranking = engine.class_ranking("L1");

    assert!(ranking.windows(2).all(|w| w[0].average >= w[1].average));
    let ranks: Vec<usize> = ranking.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, (1..=ranking.len()).collect::<Vec<_>>());
}

#[test]
fn repeated_queries_are_identical() {
    let mut data = l1_dataset();
    data.grades.push(Grade::new("M002", "MATH101", dec!(13)));
    let engine = StatisticsEngine::from_dataset(&data);

    assert_eq!(engine.class_ranking("L1"), engine.class_ranking("L1"));
    assert_eq!(engine.overview(), engine.overview());
    assert_eq!(engine.student_report("M001"), engine.student_report("M001"));
}

#[test]
fn duplicate_grades_each_count_but_report_card_shows_the_first() {
    let mut data = l1_dataset();
    data.grades.push(Grade::new("M001", "MATH101", dec!(19)));
    let engine = StatisticsEngine::from_dataset(&data);

    // (15×3 + 10×2 + 19×3) / (3 + 2 + 3)
    assert_eq!(engine.student_average("M001"), Some(dec!(15.25)));
    assert_eq!(engine.subject_average("MATH101"), Some(dec!(17)));

    let report = engine.student_report("M001").unwrap();
    let math = report
        .lines
        .iter()
        .find(|line| line.subject.code == "MATH101")
        .unwrap();
    assert_eq!(math.note, Some(dec!(15)));
    assert_eq!(math.points, Some(dec!(45)));
    assert_eq!(report.average, Some(dec!(15.25)));
}

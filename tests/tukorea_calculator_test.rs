mod common;

use admission_score::app::calculators::tukorea;
use admission_score::domain::model::GraduationStatus;
use admission_score::{Calculator, ScoreError, Subject};
use anyhow::Result;
use common::{career, final_score, ranked, reason, student, subject};

#[test]
fn test_essay_track_uses_unscaled_average() -> Result<()> {
    let calculator = tukorea::calculator();
    let mut student = student(
        "61",
        "46",
        vec![
            ranked("1", "국어", "1", "3"),
            ranked("2", "수학", "1", "3"),
            ranked("3", "영어", "2", "3"),
            ranked("4", "과학", "3", "3"),
        ],
    );

    calculator.calculate(&mut student)?;

    assert_eq!(final_score(&student), 99.25);
    assert_eq!(student.reflected_subjects().count(), 4);
    Ok(())
}

#[test]
fn test_general_track_scales_by_five() -> Result<()> {
    let calculator = tukorea::calculator();
    let mut student = student(
        "11",
        "46",
        vec![
            ranked("1", "국어", "1", "3"),
            ranked("2", "수학", "1", "3"),
            ranked("3", "영어", "2", "3"),
            ranked("4", "과학", "3", "3"),
        ],
    );

    calculator.calculate(&mut student)?;

    assert_eq!(final_score(&student), 496.25);
    Ok(())
}

#[test]
fn test_engineering_excludes_social_group() -> Result<()> {
    let calculator = tukorea::calculator();
    let mut student = student(
        "61",
        "41",
        vec![ranked("1", "국어", "1", "3"), ranked("2", "사회", "1", "3")],
    );

    calculator.calculate(&mut student)?;

    assert!(subject(&student, "1").is_reflected());
    assert!(reason(&student, "2").contains("not reflected for engineering"));
    Ok(())
}

#[test]
fn test_ranked_subjects_capped_at_four_per_group() -> Result<()> {
    let calculator = tukorea::calculator();
    let mut student = student(
        "61",
        "46",
        vec![
            ranked("1", "국어", "5", "1"),
            ranked("2", "국어", "1", "1"),
            ranked("3", "국어", "2", "1"),
            ranked("4", "국어", "3", "1"),
            ranked("5", "국어", "4", "1"),
        ],
    );

    calculator.calculate(&mut student)?;

    assert!(reason(&student, "1").contains("top 4"));
    assert_eq!(final_score(&student), 98.5);
    Ok(())
}

#[test]
fn test_career_electives_top_two_by_achievement_with_unit_one() -> Result<()> {
    let calculator = tukorea::calculator();
    let mut student = student(
        "61",
        "46",
        vec![
            ranked("1", "수학", "3", "3"),
            career("2", "수학", "B", "3"),
            career("3", "수학", "A", "2"),
            career("4", "수학", "A", "1"),
            career("5", "수학", "C", "4"),
        ],
    );

    calculator.calculate(&mut student)?;

    assert!(subject(&student, "3").is_reflected());
    assert!(subject(&student, "4").is_reflected());
    assert!(reason(&student, "2").contains("top 2 career-elective"));
    assert!(reason(&student, "5").contains("top 2 career-elective"));
    // (98 x 3 + 100 x 1 + 100 x 1) / 5
    assert_eq!(final_score(&student), 98.8);
    Ok(())
}

#[test]
fn test_business_drops_group_with_fewer_units() -> Result<()> {
    let calculator = tukorea::calculator();
    let mut student = student(
        "61",
        "71",
        vec![
            ranked("1", "국어", "1", "3"),
            ranked("2", "사회", "2", "2"),
            ranked("3", "사회", "2", "2"),
            ranked("4", "과학", "1", "3"),
        ],
    );

    calculator.calculate(&mut student)?;

    assert!(subject(&student, "2").is_reflected());
    assert!(reason(&student, "4").starts_with("과학 excluded"));
    // (100 x 3 + 99 x 2 + 99 x 2) / 7
    let expected = (300.0 + 198.0 + 198.0) / 7.0;
    assert!((final_score(&student) - expected).abs() < 1e-4);
    Ok(())
}

#[test]
fn test_business_tie_keeps_social() -> Result<()> {
    let calculator = tukorea::calculator();
    let mut student = student(
        "61",
        "72",
        vec![ranked("1", "사회", "3", "3"), ranked("2", "과학", "1", "3")],
    );

    calculator.calculate(&mut student)?;

    assert!(subject(&student, "1").is_reflected());
    assert!(!subject(&student, "2").is_reflected());
    assert_eq!(final_score(&student), 98.0);
    Ok(())
}

#[test]
fn test_only_best_korean_history_is_folded_into_science() -> Result<()> {
    let calculator = tukorea::calculator();
    let mut student = student(
        "11",
        "43",
        vec![
            ranked("1", "국어", "1", "3"),
            ranked("2", "한국사", "2", "3"),
            ranked("3", "한국사", "1", "2"),
        ],
    );

    calculator.calculate(&mut student)?;

    let best = subject(&student, "3");
    assert!(best.is_reflected());
    let formula = best
        .calculation_detail
        .as_ref()
        .and_then(|d| d.conversion_formula())
        .unwrap_or("");
    assert!(formula.contains("counted as 과학"));
    assert!(reason(&student, "2").contains("best Korean history"));
    assert_eq!(final_score(&student), 500.0);
    Ok(())
}

#[test]
fn test_business_folds_korean_history_into_kept_social() -> Result<()> {
    let calculator = tukorea::calculator();
    let mut student = student(
        "61",
        "71",
        vec![
            ranked("1", "사회", "1", "3"),
            ranked("2", "과학", "1", "3"),
            ranked("3", "한국사", "2", "2"),
        ],
    );

    calculator.calculate(&mut student)?;

    assert!(!subject(&student, "2").is_reflected());
    let formula = subject(&student, "3")
        .calculation_detail
        .as_ref()
        .and_then(|d| d.conversion_formula())
        .unwrap_or("");
    assert!(formula.contains("counted as 사회"));
    // (100 x 3 + 99 x 2) / 5
    assert_eq!(final_score(&student), 99.6);
    Ok(())
}

#[test]
fn test_korean_history_tie_prefers_larger_unit() -> Result<()> {
    let calculator = tukorea::calculator();
    let mut student = student(
        "61",
        "41",
        vec![
            ranked("1", "과학", "3", "2"),
            ranked("2", "한국사", "1", "2"),
            ranked("3", "한국사", "1", "3"),
        ],
    );

    calculator.calculate(&mut student)?;

    assert!(subject(&student, "3").is_reflected());
    assert!(reason(&student, "2").contains("best Korean history"));
    // (98 x 2 + 100 x 3) / 5
    assert_eq!(final_score(&student), 99.2);
    Ok(())
}

#[test]
fn test_percentile_fallback_for_old_graduates() -> Result<()> {
    let calculator = tukorea::calculator();
    let subjects = vec![
        Subject::new("1", "국어", "국어", 1, 1).with_class_rank(4, 1, 100),
        Subject::new("2", "수학", "수학", 1, 1).with_class_rank(401, 1, 10000),
    ];

    let mut old = student("61", "46", subjects.clone())
        .with_graduate_year(2005)
        .with_graduation_status(GraduationStatus::Graduated);
    calculator.calculate(&mut old)?;
    assert_eq!(subject(&old, "1").converted_score(), Some(100.0));
    assert_eq!(subject(&old, "2").converted_score(), Some(99.0));
    assert_eq!(final_score(&old), 99.5);

    let mut recent = student("61", "46", subjects)
        .with_graduate_year(2010)
        .with_graduation_status(GraduationStatus::Graduated);
    calculator.calculate(&mut recent)?;
    assert_eq!(final_score(&recent), 0.0);
    assert!(reason(&recent, "1").contains("no ranking grade"));
    Ok(())
}

#[test]
fn test_vocational_track_reflects_every_ranked_subject() -> Result<()> {
    let calculator = tukorea::calculator();
    let mut student = student(
        "31",
        "41",
        vec![
            ranked("1", "체육", "1", "1"),
            ranked("2", "국어", "2", "2"),
            career("3", "국어", "A", "1"),
        ],
    );

    calculator.calculate(&mut student)?;

    assert!(subject(&student, "1").is_reflected());
    assert!(!subject(&student, "3").is_reflected());
    assert_eq!(final_score(&student), 496.6667);
    Ok(())
}

#[test]
fn test_semester_window_applies_before_scoring() -> Result<()> {
    let calculator = tukorea::calculator();
    let late = Subject::new("2", "수학", "수학", 3, 2).with_ranking_grade("9").with_unit("3");
    let mut student = student("61", "46", vec![ranked("1", "국어", "1", "3"), late]);

    calculator.calculate(&mut student)?;

    assert_eq!(
        subject(&student, "2")
            .calculation_detail
            .as_ref()
            .map(|d| d.calculation_handler()),
        Some("SemesterReflectionHandler")
    );
    assert_eq!(final_score(&student), 100.0);
    Ok(())
}

#[test]
fn test_zero_eligible_subjects_scores_zero() -> Result<()> {
    let calculator = tukorea::calculator();
    let mut student = student("11", "46", vec![ranked("1", "체육", "1", "1")]);

    calculator.calculate(&mut student)?;

    assert_eq!(final_score(&student), 0.0);
    Ok(())
}

#[test]
fn test_unsupported_unit_is_rejected_without_score() {
    let calculator = tukorea::calculator();
    let mut student = student("11", "99", vec![ranked("1", "국어", "1", "3")]);

    let result = calculator.calculate(&mut student);

    assert!(matches!(result, Err(ScoreError::Rejected { .. })));
    assert!(student.score_result.is_none());
}

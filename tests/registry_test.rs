mod common;

use admission_score::app::calculators::tukorea::config::TukoreaConfig;
use admission_score::app::calculators::tukorea::handler::TukoreaScoreHandler;
use admission_score::app::report::{read_students, scores_csv, write_reports, SCORES_CSV, STUDENTS_JSON};
use admission_score::core::chain::HandlerChain;
use admission_score::core::registry::OutcomeStatus;
use admission_score::{
    Calculator, CalculatorRegistry, CalculatorType, ChainCalculator, LocalStorage, ScoreError, Student,
};
use anyhow::Result;
use common::{ranked, student};
use std::sync::Arc;
use tempfile::TempDir;

fn essay_student(id: &str) -> Student {
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
    student.id = id.to_string();
    student
}

#[test]
fn test_registry_finds_every_calculator() -> Result<()> {
    let registry = CalculatorRegistry::with_defaults();

    for calculator_type in [CalculatorType::Seonggonghoe, CalculatorType::Tukorea, CalculatorType::Yonsei] {
        let calculator = registry.find(calculator_type)?;
        assert_eq!(calculator.calculator_type(), calculator_type);
        assert!(calculator.support(calculator_type));
    }
    Ok(())
}

#[test]
fn test_empty_registry_reports_unsupported_calculator() {
    let registry = CalculatorRegistry::new();

    let result = registry.find(CalculatorType::Yonsei);

    assert!(matches!(result, Err(ScoreError::UnsupportedCalculator { .. })));
}

#[test]
fn test_scoring_is_deterministic() -> Result<()> {
    let registry = CalculatorRegistry::with_defaults();
    let mut first = essay_student("a");
    let mut second = essay_student("a");

    registry.score(CalculatorType::Tukorea, &mut first)?;
    registry.score(CalculatorType::Tukorea, &mut second)?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_missing_rule_without_validation_is_not_a_score() {
    // No validation step: the handler finds no department for unit 99 and passes through.
    let chain = HandlerChain::new().then(TukoreaScoreHandler::new(Arc::new(TukoreaConfig::default())));
    let calculator = ChainCalculator::new(CalculatorType::Tukorea, chain);
    let mut student = student("11", "99", vec![ranked("1", "국어", "1", "3")]);

    let result = calculator.calculate(&mut student);

    assert!(matches!(result, Err(ScoreError::ScoreNotProduced { .. })));
    assert!(student.score_result.is_none());
}

#[test]
fn test_stale_score_does_not_hide_missing_rule() {
    let chain = HandlerChain::new().then(TukoreaScoreHandler::new(Arc::new(TukoreaConfig::default())));
    let calculator = ChainCalculator::new(CalculatorType::Tukorea, chain);
    let mut student = student("11", "99", vec![ranked("1", "국어", "1", "3")]);
    student.set_score(123.0, "left over from an earlier run");

    let result = calculator.calculate(&mut student);

    assert!(matches!(result, Err(ScoreError::ScoreNotProduced { .. })));
    assert!(student.score_result.is_none());
}

#[test]
fn test_rescoring_ignores_earlier_subject_verdicts() -> Result<()> {
    let registry = CalculatorRegistry::with_defaults();
    let mut student = student(
        "11",
        "101",
        vec![ranked("1", "체육", "9", "2"), ranked("2", "체육", "1", "2")],
    );
    student.subjects[0].exclude("EarlierRun", "excluded before");

    registry.score(CalculatorType::Yonsei, &mut student)?;

    assert_eq!(student.current_score(), Some(-2.5));
    let detail = student.subjects[0].calculation_detail.as_ref();
    assert_eq!(detail.map(|d| d.calculation_handler()), Some("YonseiScoreHandler"));
    Ok(())
}

#[test]
fn test_scored_output_can_be_scored_again() -> Result<()> {
    let registry = CalculatorRegistry::with_defaults();
    let mut first = essay_student("a");
    registry.score(CalculatorType::Tukorea, &mut first)?;

    let json = serde_json::to_string(&first)?;
    let mut again: Student = serde_json::from_str(&json)?;
    registry.score(CalculatorType::Tukorea, &mut again)?;

    assert_eq!(first, again);
    Ok(())
}

#[test]
fn test_batch_keeps_going_after_rejection() -> Result<()> {
    let registry = CalculatorRegistry::with_defaults();
    let mut outsider = essay_student("outsider");
    outsider.recruitment_unit_code = "99".to_string();
    let mut students = vec![essay_student("first"), outsider, essay_student("last")];

    let summary = registry.score_batch(CalculatorType::Tukorea, &mut students)?;

    assert_eq!(summary.count(OutcomeStatus::Scored), 2);
    assert_eq!(summary.count(OutcomeStatus::Rejected), 1);
    assert_eq!(summary.outcomes[1].student_id, "outsider");
    assert_eq!(summary.outcomes[2].final_score, Some(99.25));
    Ok(())
}

#[test]
fn test_reports_written_to_storage() -> Result<()> {
    let registry = CalculatorRegistry::with_defaults();
    let calculator = registry.find(CalculatorType::Tukorea)?;
    let mut students = vec![essay_student("first")];
    let summary = registry.score_batch(CalculatorType::Tukorea, &mut students)?;

    let csv = scores_csv(calculator, &students, &summary)?;
    let mut lines = csv.lines();
    assert!(lines.next().unwrap_or_default().starts_with("student_id,admission"));
    assert!(lines.next().unwrap_or_default().contains("99.25"));

    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().to_string());
    let formats = vec!["csv".to_string(), "json".to_string()];
    let written = write_reports(&storage, &formats, calculator, &students, &summary)?;

    assert_eq!(written, vec![SCORES_CSV.to_string(), STUDENTS_JSON.to_string()]);
    let json = std::fs::read_to_string(temp_dir.path().join(STUDENTS_JSON))?;
    assert!(json.contains("\"final_score\": 99.25"));
    Ok(())
}

#[test]
fn test_students_read_through_storage() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let students = vec![essay_student("first"), essay_student("second")];
    std::fs::write(temp_dir.path().join("students.json"), serde_json::to_string(&students)?)?;
    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().to_string());

    let loaded = read_students(&storage, "students.json")?;

    assert_eq!(loaded, students);
    assert!(matches!(
        read_students(&storage, "missing.json"),
        Err(ScoreError::IoError(_))
    ));
    Ok(())
}

#[test]
fn test_unknown_report_format_is_rejected() -> Result<()> {
    let registry = CalculatorRegistry::with_defaults();
    let calculator = registry.find(CalculatorType::Tukorea)?;
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().to_string());

    let result = write_reports(&storage, &["xml".to_string()], calculator, &[], &Default::default());

    assert!(matches!(result, Err(ScoreError::InvalidConfigValueError { .. })));
    Ok(())
}

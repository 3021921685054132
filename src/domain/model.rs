use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::ScoreError;

/// Separation code for career-elective (진로선택) subjects.
pub const SEPARATION_CAREER: &str = "02";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraduationStatus {
    #[default]
    Expected,
    Graduated,
    Early,
}

/// An applicant and their transcript for one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub recruitment_type_code: String,
    pub recruitment_unit_code: String,
    #[serde(default)]
    pub graduate_year: Option<i32>,
    #[serde(default)]
    pub graduation_status: GraduationStatus,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub score_result: Option<ScoreResult>,
}

impl Student {
    pub fn new(id: impl Into<String>, admission: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            recruitment_type_code: admission.into(),
            recruitment_unit_code: unit.into(),
            graduate_year: None,
            graduation_status: GraduationStatus::Expected,
            subjects: Vec::new(),
            score_result: None,
        }
    }

    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    pub fn with_graduate_year(mut self, year: i32) -> Self {
        self.graduate_year = Some(year);
        self
    }

    pub fn with_graduation_status(mut self, status: GraduationStatus) -> Self {
        self.graduation_status = status;
        self
    }

    /// Subjects no earlier handler has excluded.
    pub fn candidate_subjects(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter().filter(|s| s.is_candidate())
    }

    pub fn reflected_subjects(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter().filter(|s| s.is_reflected())
    }

    pub fn set_score(&mut self, final_score: f64, explanation: impl Into<String>) {
        self.score_result = Some(ScoreResult {
            student_id: self.id.clone(),
            final_score,
            rank: None,
            explanation: explanation.into(),
        });
    }

    /// Drops the score and every subject verdict left by an earlier run.
    pub fn clear_annotations(&mut self) {
        self.score_result = None;
        for subject in &mut self.subjects {
            subject.calculation_detail = None;
        }
    }

    /// The intermediate or final value left by the previous stage.
    pub fn current_score(&self) -> Option<f64> {
        self.score_result.as_ref().map(|r| r.final_score)
    }
}

/// A single transcript line.
///
/// Numeric transcript fields arrive as the ingestion layer stored them
/// (strings), and are parsed through tolerant accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub grade: u8,
    pub term: u8,
    pub subject_name: String,
    pub subject_group: String,
    #[serde(default)]
    pub subject_separation_code: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub ranking_grade: Option<String>,
    #[serde(default)]
    pub achievement: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub same_rank: Option<String>,
    #[serde(default)]
    pub student_count: Option<String>,
    #[serde(default)]
    pub original_score: Option<String>,
    #[serde(default)]
    pub avg_score: Option<String>,
    #[serde(default)]
    pub standard_deviation: Option<String>,
    #[serde(default)]
    pub achievement_ratio: Option<String>,
    #[serde(default)]
    pub calculation_detail: Option<CalculationDetail>,
}

impl Subject {
    pub fn new(
        id: impl Into<String>,
        group: impl Into<String>,
        name: impl Into<String>,
        grade: u8,
        term: u8,
    ) -> Self {
        Self {
            id: id.into(),
            grade,
            term,
            subject_name: name.into(),
            subject_group: group.into(),
            subject_separation_code: "01".to_string(),
            unit: "1".to_string(),
            ranking_grade: None,
            achievement: None,
            rank: None,
            same_rank: None,
            student_count: None,
            original_score: None,
            avg_score: None,
            standard_deviation: None,
            achievement_ratio: None,
            calculation_detail: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_ranking_grade(mut self, grade: impl Into<String>) -> Self {
        self.ranking_grade = Some(grade.into());
        self
    }

    pub fn with_achievement(mut self, achievement: impl Into<String>) -> Self {
        self.achievement = Some(achievement.into());
        self
    }

    pub fn with_separation_code(mut self, code: impl Into<String>) -> Self {
        self.subject_separation_code = code.into();
        self
    }

    pub fn with_achievement_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.achievement_ratio = Some(ratio.into());
        self
    }

    pub fn with_class_rank(mut self, rank: u32, same_rank: u32, student_count: u32) -> Self {
        self.rank = Some(rank.to_string());
        self.same_rank = Some(same_rank.to_string());
        self.student_count = Some(student_count.to_string());
        self
    }

    pub fn with_raw_scores(mut self, original: f64, average: f64, deviation: f64) -> Self {
        self.original_score = Some(original.to_string());
        self.avg_score = Some(average.to_string());
        self.standard_deviation = Some(deviation.to_string());
        self
    }

    /// Numeric 1–9 ranking grade, `None` for letter grades or blanks.
    pub fn ranking_grade_number(&self) -> Option<u8> {
        self.ranking_grade
            .as_deref()
            .and_then(|g| g.trim().parse::<u8>().ok())
            .filter(|g| (1..=9).contains(g))
    }

    /// Letter ranking grade (A–E) used by vocational subjects.
    pub fn ranking_grade_letter(&self) -> Option<char> {
        letter_grade(self.ranking_grade.as_deref())
    }

    pub fn achievement_letter(&self) -> Option<char> {
        letter_grade(self.achievement.as_deref())
    }

    pub fn unit_value(&self) -> f64 {
        crate::utils::numeric::parse_unit(&self.unit)
    }

    pub fn a_ratio(&self) -> f64 {
        self.achievement_ratio
            .as_deref()
            .map(crate::utils::numeric::parse_a_ratio)
            .unwrap_or(0.0)
    }

    pub fn is_career_elective(&self) -> bool {
        self.subject_separation_code == SEPARATION_CAREER
    }

    pub fn is_reflected(&self) -> bool {
        self.calculation_detail
            .as_ref()
            .is_some_and(|d| d.is_reflected())
    }

    /// True unless a handler has already marked the subject as not reflected.
    pub fn is_candidate(&self) -> bool {
        self.calculation_detail
            .as_ref()
            .map_or(true, |d| d.is_reflected())
    }

    pub fn converted_score(&self) -> Option<f64> {
        self.calculation_detail
            .as_ref()
            .and_then(|d| d.converted_score())
    }

    pub fn reflect(&mut self, handler: &str, score: f64, formula: impl Into<String>) {
        self.calculation_detail = Some(CalculationDetail::reflected(handler, score, formula));
    }

    pub fn exclude(&mut self, handler: &str, reason: impl Into<String>) {
        self.calculation_detail = Some(CalculationDetail::excluded(handler, reason));
    }
}

fn letter_grade(raw: Option<&str>) -> Option<char> {
    let value = raw?.trim();
    let mut chars = value.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_none() && ('A'..='E').contains(&letter) {
        Some(letter)
    } else {
        None
    }
}

/// The most recent handler's verdict on a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationDetail {
    is_reflected: bool,
    non_reflection_reason: Option<String>,
    converted_score: Option<f64>,
    conversion_formula: Option<String>,
    calculation_handler: String,
}

impl CalculationDetail {
    pub fn reflected(handler: &str, score: f64, formula: impl Into<String>) -> Self {
        Self {
            is_reflected: true,
            non_reflection_reason: None,
            converted_score: Some(score),
            conversion_formula: Some(formula.into()),
            calculation_handler: handler.to_string(),
        }
    }

    pub fn excluded(handler: &str, reason: impl Into<String>) -> Self {
        Self {
            is_reflected: false,
            non_reflection_reason: Some(reason.into()),
            converted_score: None,
            conversion_formula: None,
            calculation_handler: handler.to_string(),
        }
    }

    pub fn is_reflected(&self) -> bool {
        self.is_reflected
    }

    pub fn non_reflection_reason(&self) -> Option<&str> {
        self.non_reflection_reason.as_deref()
    }

    pub fn converted_score(&self) -> Option<f64> {
        if self.is_reflected {
            self.converted_score
        } else {
            None
        }
    }

    pub fn conversion_formula(&self) -> Option<&str> {
        self.conversion_formula.as_deref()
    }

    pub fn calculation_handler(&self) -> &str {
        &self.calculation_handler
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub student_id: String,
    pub final_score: f64,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorType {
    Seonggonghoe,
    Tukorea,
    Yonsei,
}

impl CalculatorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorType::Seonggonghoe => "seonggonghoe",
            CalculatorType::Tukorea => "tukorea",
            CalculatorType::Yonsei => "yonsei",
        }
    }
}

impl fmt::Display for CalculatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculatorType {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seonggonghoe" | "skhu" => Ok(CalculatorType::Seonggonghoe),
            "tukorea" => Ok(CalculatorType::Tukorea),
            "yonsei" => Ok(CalculatorType::Yonsei),
            other => Err(ScoreError::UnsupportedCalculator {
                calculator_type: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    Filter,
    Calc,
}

/// Audit description of one rule in a calculator's chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerInfo {
    #[serde(rename = "type")]
    pub kind: HandlerKind,
    pub subject: String,
    pub description: String,
    pub handler_type: String,
    pub config: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_detail_hides_converted_score() {
        let detail = CalculationDetail::excluded("Test", "no grade");
        assert!(!detail.is_reflected());
        assert_eq!(detail.converted_score(), None);
        assert_eq!(detail.non_reflection_reason(), Some("no grade"));
    }

    #[test]
    fn test_detail_is_overwritten_by_latest_handler() {
        let mut subject = Subject::new("1", "국어", "국어", 1, 1);
        subject.reflect("First", 90.0, "rank 2 -> 90");
        subject.exclude("Second", "not in top 3");

        let detail = subject.calculation_detail.as_ref().unwrap();
        assert_eq!(detail.calculation_handler(), "Second");
        assert!(!subject.is_reflected());
        assert!(!subject.is_candidate());
    }

    #[test]
    fn test_ranking_grade_accessors() {
        let ranked = Subject::new("1", "수학", "수학Ⅰ", 2, 1).with_ranking_grade("3");
        assert_eq!(ranked.ranking_grade_number(), Some(3));
        assert_eq!(ranked.ranking_grade_letter(), None);

        let vocational = Subject::new("2", "전문", "회계원리", 2, 1).with_ranking_grade("b");
        assert_eq!(vocational.ranking_grade_number(), None);
        assert_eq!(vocational.ranking_grade_letter(), Some('B'));

        let broken = Subject::new("3", "수학", "미적분", 2, 1).with_ranking_grade("12");
        assert_eq!(broken.ranking_grade_number(), None);
    }

    #[test]
    fn test_clear_annotations_restores_fresh_student() {
        let mut student = Student::new("s-1", "11", "101")
            .with_subject(Subject::new("1", "국어", "국어", 1, 1).with_ranking_grade("1"));
        student.subjects[0].exclude("Earlier", "not in top 3");
        student.set_score(123.0, "earlier run");

        student.clear_annotations();

        assert!(student.score_result.is_none());
        assert!(student.subjects[0].calculation_detail.is_none());
        assert!(student.subjects[0].is_candidate());
    }

    #[test]
    fn test_calculator_type_from_str() {
        assert_eq!("Tukorea".parse::<CalculatorType>().unwrap(), CalculatorType::Tukorea);
        assert!("harvard".parse::<CalculatorType>().is_err());
    }

    #[test]
    fn test_student_deserializes_with_defaults() {
        let json = r#"{
            "id": "s-1",
            "recruitment_type_code": "11",
            "recruitment_unit_code": "101",
            "subjects": [
                {"id": "1", "grade": 1, "term": 1, "subject_name": "국어", "subject_group": "국어", "unit": "4", "ranking_grade": "2"}
            ]
        }"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.graduation_status, GraduationStatus::Expected);
        assert_eq!(student.subjects[0].ranking_grade_number(), Some(2));
        assert!(student.score_result.is_none());
    }
}

//! Generic, config-driven handlers shared by every calculator.

pub mod average_grade;
pub mod base_score_sum;
pub mod final_formula;
pub mod grade_conversion;
pub mod rounding;
pub mod semester;
pub mod subject_filter;
pub mod top_course;
pub mod unconverted_filter;
pub mod validation;

pub use average_grade::AverageGradeHandler;
pub use base_score_sum::{BaseScoreRule, BaseScoreSumHandler};
pub use final_formula::{FinalFormulaRule, FinalScoreFormulaHandler};
pub use grade_conversion::{ConversionRule, GradeConversionHandler};
pub use rounding::RoundingHandler;
pub use semester::{SemesterReflectionHandler, SemesterRule};
pub use subject_filter::SubjectGroupFilterHandler;
pub use top_course::{TopCourseHandler, TopCourseRule};
pub use unconverted_filter::UnconvertedScoreFilterHandler;
pub use validation::ValidationHandler;

use crate::domain::model::{HandlerInfo, HandlerKind};
use serde::Serialize;

pub(crate) fn handler_info<C: Serialize + ?Sized>(
    kind: HandlerKind,
    subject: impl Into<String>,
    description: impl Into<String>,
    handler_type: &str,
    config: &C,
) -> HandlerInfo {
    HandlerInfo {
        kind,
        subject: subject.into(),
        description: description.into(),
        handler_type: handler_type.to_string(),
        config: serde_json::to_value(config).unwrap_or(serde_json::Value::Null),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::model::{Student, Subject};

    pub fn ranked(id: &str, group: &str, grade: &str, unit: &str) -> Subject {
        Subject::new(id, group, group, 1, 1)
            .with_ranking_grade(grade)
            .with_unit(unit)
    }

    pub fn student(subjects: Vec<Subject>) -> Student {
        let mut student = Student::new("s-1", "11", "101");
        student.subjects = subjects;
        student
    }
}

use super::handler_info;
use crate::core::chain::CalculationContext;
use crate::core::scope::AdmissionScope;
use crate::domain::model::{HandlerInfo, HandlerKind};
use crate::domain::ports::Handler;

/// Simple mean of reflected converted scores, stored as the interim score.
///
/// With nothing reflected the score is 0 and the chain stops.
pub struct AverageGradeHandler {
    scopes: Vec<AdmissionScope>,
}

impl AverageGradeHandler {
    pub const NAME: &'static str = "AverageGradeHandler";

    pub fn new(scopes: Vec<AdmissionScope>) -> Self {
        Self { scopes }
    }
}

impl Handler for AverageGradeHandler {
    fn process(&self, context: &mut CalculationContext<'_>) {
        if !self.scopes.iter().any(|scope| scope.matches(context.student)) {
            tracing::debug!("{}: no rule for student {}", Self::NAME, context.student.id);
            return;
        }

        let scores: Vec<f64> = context
            .student
            .reflected_subjects()
            .filter_map(|s| s.converted_score())
            .collect();

        if scores.is_empty() {
            context.student.set_score(0.0, "no reflected subjects");
            context.finish(Self::NAME, "no reflected subjects");
            return;
        }

        let average = scores.iter().sum::<f64>() / scores.len() as f64;
        context.student.set_score(
            average,
            format!("average grade {} over {} subjects", average, scores.len()),
        );
    }

    fn info(&self) -> HandlerInfo {
        handler_info(
            HandlerKind::Calc,
            "reflected subjects",
            "Average grade = sum of converted scores / number of subjects",
            Self::NAME,
            &self.scopes,
        )
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::handlers::test_support::{ranked, student};

    fn handler() -> AverageGradeHandler {
        AverageGradeHandler::new(vec![AdmissionScope::new(&["11"], &["101"])])
    }

    #[test]
    fn test_simple_mean_ignores_units() {
        let mut student = student(vec![ranked("1", "국어", "1", "4"), ranked("2", "영어", "2", "1")]);
        student.subjects[0].reflect("Test", 1.0, "grade 1 -> 1");
        student.subjects[1].reflect("Test", 2.0, "grade 2 -> 2");

        let mut context = CalculationContext::new(&mut student);
        handler().process(&mut context);
        assert!(context.should_continue);
        assert_eq!(student.current_score(), Some(1.5));
    }

    #[test]
    fn test_zero_subjects_short_circuits() {
        let mut student = student(vec![]);
        let mut context = CalculationContext::new(&mut student);
        handler().process(&mut context);
        assert!(!context.should_continue);
        assert!(!context.halted_by().unwrap().rejected);
        assert_eq!(student.current_score(), Some(0.0));
    }
}

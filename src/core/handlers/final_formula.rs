use super::handler_info;
use crate::core::chain::CalculationContext;
use crate::core::scope::{find_rule, Scoped};
use crate::domain::model::{HandlerInfo, HandlerKind};
use crate::domain::ports::Handler;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FinalFormulaRule {
    pub base_score: f64,
    pub max_grade: f64,
    pub grade_divisor: f64,
    pub multiplier: f64,
}

impl FinalFormulaRule {
    pub fn apply(&self, average_grade: f64) -> f64 {
        self.base_score + ((self.max_grade - average_grade) / self.grade_divisor) * self.multiplier
    }
}

/// Turns the interim average grade into the final score.
pub struct FinalScoreFormulaHandler {
    rules: Vec<Scoped<FinalFormulaRule>>,
}

impl FinalScoreFormulaHandler {
    pub const NAME: &'static str = "FinalScoreFormulaHandler";

    pub fn new(rules: Vec<Scoped<FinalFormulaRule>>) -> Self {
        Self { rules }
    }
}

impl Handler for FinalScoreFormulaHandler {
    fn process(&self, context: &mut CalculationContext<'_>) {
        let Some(rule) = find_rule(&self.rules, context.student) else {
            tracing::debug!("{}: no rule for student {}", Self::NAME, context.student.id);
            return;
        };
        let Some(average_grade) = context.student.current_score() else {
            tracing::debug!("{}: no average grade for student {}", Self::NAME, context.student.id);
            return;
        };

        let final_score = rule.apply(average_grade);
        context.student.set_score(
            final_score,
            format!(
                "{} + (({} - {}) / {}) x {} = {}",
                rule.base_score, rule.max_grade, average_grade, rule.grade_divisor, rule.multiplier, final_score
            ),
        );
    }

    fn info(&self) -> HandlerInfo {
        handler_info(
            HandlerKind::Calc,
            "average grade",
            "Final score = base + ((max grade - average grade) / divisor) x multiplier",
            Self::NAME,
            &self.rules,
        )
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::handlers::test_support::student;
    use crate::core::scope::AdmissionScope;

    #[test]
    fn test_formula_consumes_previous_score() {
        let handler = FinalScoreFormulaHandler::new(vec![Scoped::new(
            AdmissionScope::new(&["11"], &["101"]),
            FinalFormulaRule {
                base_score: 600.0,
                max_grade: 9.0,
                grade_divisor: 8.0,
                multiplier: 400.0,
            },
        )]);
        let mut student = student(vec![]);
        student.set_score(1.0, "average grade");

        handler.process(&mut CalculationContext::new(&mut student));

        assert_eq!(student.current_score(), Some(1000.0));
    }

    #[test]
    fn test_no_prior_score_leaves_result_unset() {
        let handler = FinalScoreFormulaHandler::new(vec![Scoped::new(
            AdmissionScope::new(&["11"], &["101"]),
            FinalFormulaRule {
                base_score: 600.0,
                max_grade: 9.0,
                grade_divisor: 8.0,
                multiplier: 400.0,
            },
        )]);
        let mut student = student(vec![]);
        handler.process(&mut CalculationContext::new(&mut student));
        assert!(student.score_result.is_none());
    }
}

use super::handler_info;
use crate::core::chain::CalculationContext;
use crate::core::scope::{find_rule, Scoped};
use crate::domain::model::{HandlerInfo, HandlerKind};
use crate::domain::ports::Handler;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BaseScoreRule {
    pub base_score: f64,
}

/// `finalScore = baseScore + Σ convertedScore`.
pub struct BaseScoreSumHandler {
    rules: Vec<Scoped<BaseScoreRule>>,
}

impl BaseScoreSumHandler {
    pub const NAME: &'static str = "BaseScoreSumHandler";

    pub fn new(rules: Vec<Scoped<BaseScoreRule>>) -> Self {
        Self { rules }
    }
}

impl Handler for BaseScoreSumHandler {
    fn process(&self, context: &mut CalculationContext<'_>) {
        let Some(rule) = find_rule(&self.rules, context.student) else {
            tracing::debug!("{}: no rule for student {}", Self::NAME, context.student.id);
            return;
        };

        let scores: Vec<f64> = context
            .student
            .reflected_subjects()
            .filter_map(|s| s.converted_score())
            .collect();

        if scores.is_empty() {
            context.student.set_score(
                rule.base_score,
                format!("no reflected subjects; base score {}", rule.base_score),
            );
            return;
        }

        let sum: f64 = scores.iter().sum();
        let final_score = rule.base_score + sum;
        context.student.set_score(
            final_score,
            format!("{} + {} ({} subjects) = {}", rule.base_score, sum, scores.len(), final_score),
        );
    }

    fn info(&self) -> HandlerInfo {
        handler_info(
            HandlerKind::Calc,
            "reflected subjects",
            "Final score = base score + sum of converted scores",
            Self::NAME,
            &self.rules,
        )
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

use super::handler_info;
use crate::core::chain::CalculationContext;
use crate::core::scope::{find_rule, Scoped};
use crate::domain::model::{HandlerInfo, HandlerKind};
use crate::domain::ports::Handler;
use crate::utils::numeric::round_half_up;

/// Rounds the current score half-up to the configured number of digits.
pub struct RoundingHandler {
    rules: Vec<Scoped<u32>>,
}

impl RoundingHandler {
    pub const NAME: &'static str = "RoundingHandler";

    pub fn new(rules: Vec<Scoped<u32>>) -> Self {
        Self { rules }
    }
}

impl Handler for RoundingHandler {
    fn process(&self, context: &mut CalculationContext<'_>) {
        let Some(digits) = find_rule(&self.rules, context.student) else {
            return;
        };
        if let Some(result) = context.student.score_result.as_mut() {
            let rounded = round_half_up(result.final_score, *digits);
            result.explanation = format!("{}; rounded to {} digits = {}", result.explanation, digits, rounded);
            result.final_score = rounded;
        }
    }

    fn info(&self) -> HandlerInfo {
        handler_info(
            HandlerKind::Calc,
            "final score",
            "Final score rounded half-up",
            Self::NAME,
            &self.rules,
        )
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

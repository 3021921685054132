use super::handler_info;
use crate::core::chain::CalculationContext;
use crate::domain::model::{HandlerInfo, HandlerKind};
use crate::domain::ports::Handler;

/// Marks every remaining subject without a converted score as not reflected.
#[derive(Default)]
pub struct UnconvertedScoreFilterHandler;

impl UnconvertedScoreFilterHandler {
    pub const NAME: &'static str = "UnconvertedScoreFilterHandler";

    pub fn new() -> Self {
        Self
    }
}

impl Handler for UnconvertedScoreFilterHandler {
    fn process(&self, context: &mut CalculationContext<'_>) {
        for subject in context.student.subjects.iter_mut().filter(|s| s.is_candidate()) {
            if subject.converted_score().is_none() {
                subject.exclude(Self::NAME, "no convertible grade");
            }
        }
    }

    fn info(&self) -> HandlerInfo {
        handler_info(
            HandlerKind::Filter,
            "all subjects",
            "Subjects without a converted score are not reflected",
            Self::NAME,
            &serde_json::Value::Null,
        )
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

use super::handler_info;
use crate::core::chain::CalculationContext;
use crate::core::scope::{separation_matches, Scoped};
use crate::domain::model::{HandlerInfo, HandlerKind};
use crate::domain::ports::Handler;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct ConversionRule {
    /// Empty means every separation code.
    pub separation_codes: Vec<String>,
    pub table: BTreeMap<u8, f64>,
}

impl ConversionRule {
    pub fn new(separation_codes: Vec<String>, table: &[(u8, f64)]) -> Self {
        Self {
            separation_codes,
            table: table.iter().copied().collect(),
        }
    }
}

/// Converts 1–9 ranking grades to scores.
///
/// Subjects without a convertible grade are left untouched for the
/// unconverted-score filter.
pub struct GradeConversionHandler {
    rules: Vec<Scoped<ConversionRule>>,
}

impl GradeConversionHandler {
    pub const NAME: &'static str = "GradeConversionHandler";

    pub fn new(rules: Vec<Scoped<ConversionRule>>) -> Self {
        Self { rules }
    }
}

impl Handler for GradeConversionHandler {
    fn process(&self, context: &mut CalculationContext<'_>) {
        let applicable: Vec<&ConversionRule> = self
            .rules
            .iter()
            .filter(|scoped| scoped.scope.matches(context.student))
            .map(|scoped| &scoped.rule)
            .collect();
        if applicable.is_empty() {
            tracing::debug!("{}: no rule for student {}", Self::NAME, context.student.id);
            return;
        }

        for subject in context.student.subjects.iter_mut().filter(|s| s.is_candidate()) {
            let Some(rule) = applicable
                .iter()
                .find(|rule| separation_matches(&rule.separation_codes, subject))
            else {
                continue;
            };
            let Some(grade) = subject.ranking_grade_number() else {
                tracing::debug!("{}: {} has no ranking grade", Self::NAME, subject.subject_name);
                continue;
            };
            if let Some(score) = rule.table.get(&grade) {
                subject.reflect(Self::NAME, *score, format!("grade {grade} -> {score}"));
            }
        }
    }

    fn info(&self) -> HandlerInfo {
        handler_info(
            HandlerKind::Calc,
            "all subjects",
            "Ranking grade converted through the track's score table",
            Self::NAME,
            &self.rules,
        )
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

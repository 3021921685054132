use super::handler_info;
use crate::core::chain::CalculationContext;
use crate::core::scope::{find_rule, Scoped};
use crate::domain::model::{GraduationStatus, HandlerInfo, HandlerKind, Subject};
use crate::domain::ports::Handler;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SemesterRule {
    pub max_grade: u8,
    pub max_term: u8,
    /// Graduates keep the whole final school year instead of the truncated window.
    pub full_window_for_graduates: bool,
}

impl SemesterRule {
    fn window_for(&self, status: GraduationStatus) -> (u8, u8) {
        if status == GraduationStatus::Graduated && self.full_window_for_graduates {
            (self.max_grade, 2)
        } else {
            (self.max_grade, self.max_term)
        }
    }
}

/// Drops subjects taken outside the reflected semesters.
pub struct SemesterReflectionHandler {
    rules: Vec<Scoped<SemesterRule>>,
}

impl SemesterReflectionHandler {
    pub const NAME: &'static str = "SemesterReflectionHandler";

    pub fn new(rules: Vec<Scoped<SemesterRule>>) -> Self {
        Self { rules }
    }
}

fn exclusion_reason(subject: &Subject, window: (u8, u8), status: GraduationStatus) -> Option<String> {
    let (max_grade, max_term) = window;
    if subject.grade > max_grade || (subject.grade == max_grade && subject.term > max_term) {
        return Some(format!(
            "grade {}-{} is outside the reflected window (up to {}-{})",
            subject.grade, subject.term, max_grade, max_term
        ));
    }
    if status == GraduationStatus::Early && subject.grade == 2 && subject.term == 2 {
        return Some("grade 2-2 is not reflected for early graduates".to_string());
    }
    None
}

impl Handler for SemesterReflectionHandler {
    fn process(&self, context: &mut CalculationContext<'_>) {
        let Some(rule) = find_rule(&self.rules, context.student) else {
            tracing::debug!("{}: no rule for student {}", Self::NAME, context.student.id);
            return;
        };

        let status = context.student.graduation_status;
        let window = rule.window_for(status);
        for subject in context.student.subjects.iter_mut().filter(|s| s.is_candidate()) {
            if let Some(reason) = exclusion_reason(subject, window, status) {
                tracing::debug!("{}: {} excluded ({})", Self::NAME, subject.subject_name, reason);
                subject.exclude(Self::NAME, reason);
            }
        }
    }

    fn info(&self) -> HandlerInfo {
        handler_info(
            HandlerKind::Filter,
            "all subjects",
            "Only subjects within the reflected school-year/term window count",
            Self::NAME,
            &self.rules,
        )
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

use super::handler_info;
use crate::core::chain::CalculationContext;
use crate::core::scope::{find_rule, separation_matches, Scoped};
use crate::domain::model::{HandlerInfo, HandlerKind, Subject};
use crate::domain::ports::Handler;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Serialize)]
pub struct TopCourseRule {
    pub group_name: String,
    pub subject_groups: Vec<String>,
    /// Empty means every separation code.
    pub separation_codes: Vec<String>,
    pub top_course_count: usize,
}

/// Keeps the best `top_course_count` reflected subjects of each rule's groups.
pub struct TopCourseHandler {
    rules: Vec<Scoped<Vec<TopCourseRule>>>,
}

impl TopCourseHandler {
    pub const NAME: &'static str = "TopCourseHandler";

    pub fn new(rules: Vec<Scoped<Vec<TopCourseRule>>>) -> Self {
        Self { rules }
    }
}

/// Higher score first, then larger unit, then the course with fewer A grades.
pub fn compare_courses(a: &Subject, b: &Subject) -> Ordering {
    let score_a = a.converted_score().unwrap_or(f64::MIN);
    let score_b = b.converted_score().unwrap_or(f64::MIN);
    score_b
        .total_cmp(&score_a)
        .then_with(|| b.unit_value().total_cmp(&a.unit_value()))
        .then_with(|| a.a_ratio().total_cmp(&b.a_ratio()))
}

impl Handler for TopCourseHandler {
    fn process(&self, context: &mut CalculationContext<'_>) {
        let Some(rules) = find_rule(&self.rules, context.student) else {
            tracing::debug!("{}: no rule for student {}", Self::NAME, context.student.id);
            return;
        };

        let subjects = &mut context.student.subjects;
        for rule in rules {
            let mut members: Vec<usize> = subjects
                .iter()
                .enumerate()
                .filter(|(_, s)| {
                    s.is_reflected()
                        && rule.subject_groups.contains(&s.subject_group)
                        && separation_matches(&rule.separation_codes, s)
                })
                .map(|(index, _)| index)
                .collect();
            members.sort_by(|&a, &b| compare_courses(&subjects[a], &subjects[b]));

            for &index in members.iter().skip(rule.top_course_count) {
                let subject = &mut subjects[index];
                tracing::debug!("{}: {} outside top {}", Self::NAME, subject.subject_name, rule.top_course_count);
                subject.exclude(
                    Self::NAME,
                    format!("{}: not within the top {} courses", rule.group_name, rule.top_course_count),
                );
            }
        }
    }

    fn info(&self) -> HandlerInfo {
        let mut groups: Vec<&str> = self
            .rules
            .iter()
            .flat_map(|scoped| scoped.rule.iter().map(|r| r.group_name.as_str()))
            .collect();
        groups.sort_unstable();
        groups.dedup();

        handler_info(
            HandlerKind::Filter,
            groups.join(", "),
            "Top courses per group by score, then credit unit, then lower A-ratio",
            Self::NAME,
            &self.rules,
        )
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

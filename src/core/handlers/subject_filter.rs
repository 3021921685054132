use super::handler_info;
use crate::core::chain::CalculationContext;
use crate::core::scope::{find_rule, Scoped};
use crate::domain::model::{HandlerInfo, HandlerKind};
use crate::domain::ports::Handler;

/// Keeps only subjects whose subject group is on the allow-list.
pub struct SubjectGroupFilterHandler {
    rules: Vec<Scoped<Vec<String>>>,
}

impl SubjectGroupFilterHandler {
    pub const NAME: &'static str = "SubjectGroupFilterHandler";

    pub fn new(rules: Vec<Scoped<Vec<String>>>) -> Self {
        Self { rules }
    }
}

impl Handler for SubjectGroupFilterHandler {
    fn process(&self, context: &mut CalculationContext<'_>) {
        let Some(groups) = find_rule(&self.rules, context.student) else {
            tracing::debug!("{}: no rule for student {}", Self::NAME, context.student.id);
            return;
        };

        for subject in context.student.subjects.iter_mut().filter(|s| s.is_candidate()) {
            if !groups.contains(&subject.subject_group) {
                let reason = format!("subject group '{}' is not reflected", subject.subject_group);
                subject.exclude(Self::NAME, reason);
            }
        }
    }

    fn info(&self) -> HandlerInfo {
        let mut groups: Vec<&str> = self
            .rules
            .iter()
            .flat_map(|scoped| scoped.rule.iter().map(String::as_str))
            .collect();
        groups.sort_unstable();
        groups.dedup();

        handler_info(
            HandlerKind::Filter,
            groups.join(", "),
            "Only the listed subject groups are reflected",
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
    use crate::core::handlers::test_support::{ranked, student};
    use crate::core::scope::{to_strings, AdmissionScope};

    #[test]
    fn test_excludes_groups_outside_allow_list() {
        let handler = SubjectGroupFilterHandler::new(vec![Scoped::new(
            AdmissionScope::new(&["11"], &["101"]),
            to_strings(&["국어", "수학"]),
        )]);
        let mut student = student(vec![
            ranked("1", "국어", "1", "4"),
            ranked("2", "체육", "1", "2"),
        ]);

        handler.process(&mut CalculationContext::new(&mut student));

        assert!(student.subjects[0].is_candidate());
        let detail = student.subjects[1].calculation_detail.as_ref().unwrap();
        assert!(!detail.is_reflected());
        assert_eq!(detail.calculation_handler(), SubjectGroupFilterHandler::NAME);
    }
}

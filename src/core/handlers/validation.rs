use super::handler_info;
use crate::core::chain::CalculationContext;
use crate::core::scope::AdmissionScope;
use crate::domain::model::{HandlerInfo, HandlerKind};
use crate::domain::ports::Handler;

/// Rejects students whose admission/unit pair the university does not score.
pub struct ValidationHandler {
    scopes: Vec<AdmissionScope>,
}

impl ValidationHandler {
    pub const NAME: &'static str = "ValidationHandler";

    pub fn new(scopes: Vec<AdmissionScope>) -> Self {
        Self { scopes }
    }
}

impl Handler for ValidationHandler {
    fn process(&self, context: &mut CalculationContext<'_>) {
        if self.scopes.iter().any(|scope| scope.matches(context.student)) {
            return;
        }

        let message = format!(
            "admission {} / unit {} is not a supported combination",
            context.student.recruitment_type_code, context.student.recruitment_unit_code
        );
        context.reject(Self::NAME, message);
    }

    fn info(&self) -> HandlerInfo {
        handler_info(
            HandlerKind::Filter,
            "all subjects",
            "Only configured admission/unit combinations are scored",
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
    use crate::domain::model::Student;

    #[test]
    fn test_rejects_unknown_unit() {
        let handler = ValidationHandler::new(vec![AdmissionScope::new(&["11"], &["101"])]);

        let mut accepted = Student::new("a", "11", "101");
        let mut context = CalculationContext::new(&mut accepted);
        handler.process(&mut context);
        assert!(context.should_continue);

        let mut rejected = Student::new("b", "11", "999");
        let mut context = CalculationContext::new(&mut rejected);
        handler.process(&mut context);
        assert!(!context.should_continue);
        assert!(context.halted_by().unwrap().rejected);
    }
}

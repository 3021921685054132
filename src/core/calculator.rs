use crate::core::chain::{CalculationContext, HandlerChain};
use crate::domain::model::{CalculatorType, HandlerInfo, Student};
use crate::domain::ports::Calculator;
use crate::utils::error::{Result, ScoreError};
use std::collections::BTreeMap;

/// A university's handler chain bound to its calculator type.
pub struct ChainCalculator {
    calculator_type: CalculatorType,
    chain: HandlerChain,
    admission_names: BTreeMap<String, String>,
    unit_names: BTreeMap<String, String>,
}

impl ChainCalculator {
    pub fn new(calculator_type: CalculatorType, chain: HandlerChain) -> Self {
        Self {
            calculator_type,
            chain,
            admission_names: BTreeMap::new(),
            unit_names: BTreeMap::new(),
        }
    }

    pub fn with_admission_names(mut self, names: &[(&str, &str)]) -> Self {
        self.admission_names = to_map(names);
        self
    }

    pub fn with_unit_names(mut self, names: &[(&str, &str)]) -> Self {
        self.unit_names = to_map(names);
        self
    }
}

fn to_map(names: &[(&str, &str)]) -> BTreeMap<String, String> {
    names
        .iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect()
}

impl Calculator for ChainCalculator {
    fn calculator_type(&self) -> CalculatorType {
        self.calculator_type
    }

    fn calculate(&self, student: &mut Student) -> Result<()> {
        student.clear_annotations();
        let mut context = CalculationContext::new(student);
        self.chain.handle(&mut context);

        if let Some(halt) = context.halted_by() {
            if halt.rejected {
                tracing::warn!(
                    "⛔ {} rejected student {}: {}",
                    halt.handler,
                    context.student.id,
                    halt.message
                );
                return Err(ScoreError::Rejected {
                    student_id: context.student.id.clone(),
                    reason: halt.message.clone(),
                });
            }
        }

        let student = context.student;
        match &student.score_result {
            Some(result) => {
                tracing::info!(
                    "✅ {} scored student {}: {}",
                    self.calculator_type,
                    student.id,
                    result.final_score
                );
                Ok(())
            }
            None => Err(ScoreError::ScoreNotProduced {
                student_id: student.id.clone(),
                admission: student.recruitment_type_code.clone(),
                unit: student.recruitment_unit_code.clone(),
            }),
        }
    }

    fn calculator_info(&self) -> Vec<HandlerInfo> {
        self.chain.infos()
    }

    fn admission_mapper(&self) -> &BTreeMap<String, String> {
        &self.admission_names
    }

    fn unit_mapper(&self) -> &BTreeMap<String, String> {
        &self.unit_names
    }
}

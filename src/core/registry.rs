use crate::app::calculators::{seonggonghoe, tukorea, yonsei};
use crate::domain::model::{CalculatorType, Student};
use crate::domain::ports::Calculator;
use crate::utils::error::{Result, ScoreError};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Scored,
    Rejected,
    NotProduced,
}

/// Result of scoring one student in a batch.
#[derive(Debug, Clone, Serialize)]
pub struct StudentOutcome {
    pub student_id: String,
    pub status: OutcomeStatus,
    pub final_score: Option<f64>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub outcomes: Vec<StudentOutcome>,
}

impl BatchSummary {
    pub fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}

/// Selects the calculator for a season's configured type.
#[derive(Default)]
pub struct CalculatorRegistry {
    calculators: Vec<Box<dyn Calculator>>,
}

impl CalculatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every calculator this crate ships.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(seonggonghoe::calculator()));
        registry.register(Box::new(tukorea::calculator()));
        registry.register(Box::new(yonsei::calculator()));
        registry
    }

    pub fn register(&mut self, calculator: Box<dyn Calculator>) {
        self.calculators.push(calculator);
    }

    pub fn find(&self, calculator_type: CalculatorType) -> Result<&dyn Calculator> {
        self.calculators
            .iter()
            .find(|c| c.support(calculator_type))
            .map(|c| c.as_ref())
            .ok_or_else(|| ScoreError::UnsupportedCalculator {
                calculator_type: calculator_type.to_string(),
            })
    }

    pub fn score(&self, calculator_type: CalculatorType, student: &mut Student) -> Result<()> {
        self.find(calculator_type)?.calculate(student)
    }

    /// Scores every student; one student's failure never stops the batch.
    pub fn score_batch(&self, calculator_type: CalculatorType, students: &mut [Student]) -> Result<BatchSummary> {
        let calculator = self.find(calculator_type)?;
        let mut summary = BatchSummary::default();

        tracing::info!("🚀 Scoring {} students with {}", students.len(), calculator_type);
        for student in students.iter_mut() {
            let outcome = match calculator.calculate(student) {
                Ok(()) => StudentOutcome {
                    student_id: student.id.clone(),
                    status: OutcomeStatus::Scored,
                    final_score: student.current_score(),
                    message: None,
                },
                Err(e @ ScoreError::Rejected { .. }) => StudentOutcome {
                    student_id: student.id.clone(),
                    status: OutcomeStatus::Rejected,
                    final_score: None,
                    message: Some(e.to_string()),
                },
                Err(e) => {
                    tracing::error!("❌ {}", e);
                    StudentOutcome {
                        student_id: student.id.clone(),
                        status: OutcomeStatus::NotProduced,
                        final_score: None,
                        message: Some(e.to_string()),
                    }
                }
            };
            summary.outcomes.push(outcome);
        }

        tracing::info!(
            "📊 Scored {}, rejected {}, without score {}",
            summary.count(OutcomeStatus::Scored),
            summary.count(OutcomeStatus::Rejected),
            summary.count(OutcomeStatus::NotProduced)
        );
        Ok(summary)
    }
}

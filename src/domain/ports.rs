use crate::core::chain::CalculationContext;
use crate::domain::model::{CalculatorType, HandlerInfo, Student};
use crate::utils::error::Result;
use std::collections::BTreeMap;

/// One rule evaluation step in a calculator chain.
///
/// Handlers hold only immutable configuration, so a chain is reusable
/// across students.
pub trait Handler: Send + Sync {
    fn process(&self, context: &mut CalculationContext<'_>);

    fn info(&self) -> HandlerInfo;

    /// Name recorded on every `CalculationDetail` the handler writes.
    fn name(&self) -> &'static str;
}

pub trait Calculator: Send + Sync {
    fn calculator_type(&self) -> CalculatorType;

    fn support(&self, calculator_type: CalculatorType) -> bool {
        self.calculator_type() == calculator_type
    }

    fn calculate(&self, student: &mut Student) -> Result<()>;

    fn calculator_info(&self) -> Vec<HandlerInfo>;

    fn admission_mapper(&self) -> &BTreeMap<String, String>;

    fn unit_mapper(&self) -> &BTreeMap<String, String>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

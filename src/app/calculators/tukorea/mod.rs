//! Tukorea: generic validation and semester filtering, then one scoring handler.

pub mod config;
pub mod handler;

use crate::core::calculator::ChainCalculator;
use crate::core::chain::HandlerChain;
use crate::core::handlers::{SemesterReflectionHandler, ValidationHandler};
use crate::core::scope::Scoped;
use crate::domain::model::CalculatorType;
use config::{TukoreaConfig, ADMISSION_NAMES, UNIT_NAMES};
use handler::TukoreaScoreHandler;
use std::sync::Arc;

pub fn calculator() -> ChainCalculator {
    calculator_with(TukoreaConfig::default())
}

pub fn calculator_with(config: TukoreaConfig) -> ChainCalculator {
    let config = Arc::new(config);
    let chain = HandlerChain::new()
        .then(ValidationHandler::new(vec![config.supported_scope()]))
        .then(SemesterReflectionHandler::new(vec![Scoped::new(
            config.supported_scope(),
            config.semester_rule(),
        )]))
        .then(TukoreaScoreHandler::new(config));

    ChainCalculator::new(CalculatorType::Tukorea, chain)
        .with_admission_names(ADMISSION_NAMES)
        .with_unit_names(UNIT_NAMES)
}

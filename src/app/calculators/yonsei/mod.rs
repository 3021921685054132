//! Yonsei: generic validation and semester filtering, then one scoring handler.

pub mod config;
pub mod handler;

use crate::core::calculator::ChainCalculator;
use crate::core::chain::HandlerChain;
use crate::core::handlers::{SemesterReflectionHandler, ValidationHandler};
use crate::core::scope::Scoped;
use crate::domain::model::CalculatorType;
use config::{YonseiConfig, ADMISSION_NAMES, UNIT_NAMES};
use handler::YonseiScoreHandler;
use std::sync::Arc;

pub fn calculator() -> ChainCalculator {
    calculator_with(YonseiConfig::default())
}

pub fn calculator_with(config: YonseiConfig) -> ChainCalculator {
    let config = Arc::new(config);
    let chain = HandlerChain::new()
        .then(ValidationHandler::new(vec![config.supported_scope()]))
        .then(SemesterReflectionHandler::new(vec![Scoped::new(
            config.supported_scope(),
            config.semester_rule(),
        )]))
        .then(YonseiScoreHandler::new(config));

    ChainCalculator::new(CalculatorType::Yonsei, chain)
        .with_admission_names(ADMISSION_NAMES)
        .with_unit_names(UNIT_NAMES)
}

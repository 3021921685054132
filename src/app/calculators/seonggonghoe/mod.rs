//! Seonggonghoe: a calculator composed entirely of generic handlers.

pub mod config;

use crate::core::calculator::ChainCalculator;
use crate::core::chain::HandlerChain;
use crate::core::handlers::{
    AverageGradeHandler, BaseScoreSumHandler, FinalScoreFormulaHandler, GradeConversionHandler,
    RoundingHandler, SemesterReflectionHandler, SubjectGroupFilterHandler, TopCourseHandler,
    UnconvertedScoreFilterHandler, ValidationHandler,
};
use crate::core::scope::{to_strings, Scoped};
use crate::domain::model::CalculatorType;
use config::{SeonggonghoeConfig, ADMISSION_NAMES, CORE_GROUPS, PRACTICAL_GROUPS, ROUNDING_DIGITS, UNIT_NAMES};

pub fn calculator() -> ChainCalculator {
    calculator_with(SeonggonghoeConfig::default())
}

pub fn calculator_with(config: SeonggonghoeConfig) -> ChainCalculator {
    let chain = HandlerChain::new()
        .then(ValidationHandler::new(vec![config.all_scope()]))
        .then(SemesterReflectionHandler::new(vec![Scoped::new(
            config.all_scope(),
            config.semester_rule(),
        )]))
        .then(SubjectGroupFilterHandler::new(vec![
            Scoped::new(config.averaged_scope(), to_strings(CORE_GROUPS)),
            Scoped::new(config.practical_scope(), to_strings(PRACTICAL_GROUPS)),
        ]))
        .then(GradeConversionHandler::new(vec![
            Scoped::new(config.standard_scope(), config.standard_conversion()),
            Scoped::new(config.vocational_scope(), config.vocational_conversion()),
            Scoped::new(config.practical_scope(), config.practical_conversion()),
        ]))
        .then(UnconvertedScoreFilterHandler::new())
        .then(TopCourseHandler::new(vec![Scoped::new(
            config.practical_scope(),
            config.practical_top_courses(),
        )]))
        .then(AverageGradeHandler::new(vec![config.averaged_scope()]))
        .then(FinalScoreFormulaHandler::new(vec![
            Scoped::new(config.standard_scope(), config.standard_formula()),
            Scoped::new(config.vocational_scope(), config.vocational_formula()),
        ]))
        .then(BaseScoreSumHandler::new(vec![Scoped::new(
            config.practical_scope(),
            config.practical_base(),
        )]))
        .then(RoundingHandler::new(vec![Scoped::new(config.all_scope(), ROUNDING_DIGITS)]));

    ChainCalculator::new(CalculatorType::Seonggonghoe, chain)
        .with_admission_names(ADMISSION_NAMES)
        .with_unit_names(UNIT_NAMES)
}

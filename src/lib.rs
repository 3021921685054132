pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, LocalStorage};

pub use config::SeasonConfig;
pub use core::{calculator::ChainCalculator, registry::CalculatorRegistry};
pub use domain::model::{CalculationDetail, CalculatorType, HandlerInfo, ScoreResult, Student, Subject};
pub use domain::ports::{Calculator, Handler};
pub use utils::error::{Result, ScoreError};

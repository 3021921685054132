pub mod calculator;
pub mod chain;
pub mod handlers;
pub mod registry;
pub mod scope;

pub use crate::domain::model::{CalculationDetail, ScoreResult, Student, Subject};
pub use crate::domain::ports::{Calculator, Handler, Storage};
pub use crate::utils::error::Result;

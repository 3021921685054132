pub mod calculators;
pub mod report;

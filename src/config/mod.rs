#[cfg(feature = "cli")]
pub mod cli;
pub mod season_config;

pub use season_config::SeasonConfig;

// Domain layer: transcript models and the handler/calculator ports.

pub mod model;
pub mod ports;

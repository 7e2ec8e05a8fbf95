pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod io;

pub use application::CalculatorSession;
pub use domain::*;
